//! Built-in rule-based NLP pipeline.

use std::ops::Range;

use lexiscope_core::Result;
use tracing::debug;

use crate::lemma::lemmatize;
use crate::ner::recognize;
use crate::pipeline::{AnnotatedDoc, NlpPipeline, Token};
use crate::stopwords::is_stopword;
use crate::tagger::{tag, PosTag};
use crate::tokenize::{count_sentences, tokenize, TokenKind};

/// Tokenizer, tagger, lemmatizer and entity recognizer in one pass.
#[derive(Debug, Default, Clone)]
pub struct HeuristicPipeline;

impl HeuristicPipeline {
    pub fn new() -> Self {
        Self
    }
}

impl NlpPipeline for HeuristicPipeline {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn annotate(&self, text: &str) -> Result<AnnotatedDoc> {
        let raw = tokenize(text);
        let tags = tag(&raw);
        let entities = recognize(text, &raw, &tags);
        let sentence_count = count_sentences(&raw);

        let tokens: Vec<Token> = raw
            .iter()
            .zip(&tags)
            .map(|(t, &pos)| Token {
                lemma: lemmatize(&t.text, pos),
                pos,
                is_stop: is_stopword(&t.text),
                is_punct: t.kind == TokenKind::Punct,
                is_space: false,
                like_email: t.kind == TokenKind::Email,
                like_url: t.kind == TokenKind::Url,
                start: t.start,
                end: t.end,
                sentence: t.sentence,
                text: t.text.clone(),
            })
            .collect();

        let noun_chunks = noun_chunks(&tokens);
        debug!(
            tokens = tokens.len(),
            entities = entities.len(),
            chunks = noun_chunks.len(),
            sentences = sentence_count,
            "Annotated text"
        );

        Ok(AnnotatedDoc {
            tokens,
            entities,
            noun_chunks,
            sentence_count,
        })
    }
}

fn is_chunk_member(pos: PosTag) -> bool {
    matches!(
        pos,
        PosTag::Determiner | PosTag::Adjective | PosTag::Number | PosTag::Noun | PosTag::ProperNoun
    )
}

/// Base noun phrases: determiners, adjectives and numbers followed by nouns,
/// ending on a noun and never crossing a sentence boundary.
fn noun_chunks(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;
    let mut last_nominal: Option<usize> = None;

    let mut close = |start: &mut Option<usize>, last_nominal: &mut Option<usize>| {
        if let (Some(s), Some(end)) = (start.take(), last_nominal.take()) {
            chunks.push(s..end + 1);
        }
    };

    for (i, token) in tokens.iter().enumerate() {
        let crosses_sentence = start.is_some_and(|s| tokens[s].sentence != token.sentence);
        // A determiner or modifier after the head opens a new phrase.
        let after_head = last_nominal == Some(i.wrapping_sub(1)) && !token.pos.is_nominal();
        if crosses_sentence || !is_chunk_member(token.pos) || after_head {
            close(&mut start, &mut last_nominal);
            start = None;
        }
        if !is_chunk_member(token.pos) {
            continue;
        }
        if start.is_none() {
            start = Some(i);
        }
        if token.pos.is_nominal() {
            last_nominal = Some(i);
        }
    }
    close(&mut start, &mut last_nominal);
    chunks
}
