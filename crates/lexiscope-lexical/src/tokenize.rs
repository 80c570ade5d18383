//! Rule-based word tokenizer.
//!
//! Splits on whitespace, peels leading/trailing punctuation into their own
//! tokens, and keeps URLs, e-mail addresses, numbers and known abbreviations
//! whole. Byte offsets point back into the source text so spans can be sliced
//! out verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Coarse lexical class of a raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    Punct,
    Email,
    Url,
}

/// A token with its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
    /// Index of the sentence this token belongs to.
    pub sentence: usize,
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").expect("valid email regex"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d[\d,]*(\.\d+)?%?$").expect("valid number regex"));

/// Clock times and numbers with a short suffix: `9:30pm`, `1990s`, `3rd`.
static NUMERIC_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d{1,2}:\d{2}(?:am|pm)?$|^\d+(?:s|st|nd|rd|th|am|pm)$")
        .expect("valid numeric word regex")
});

/// Words whose trailing period belongs to the word rather than ending a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "inc", "corp", "ltd", "co", "vs",
        "etc", "e.g", "i.e", "u.s", "u.k", "fig", "jan", "feb", "mar", "apr", "jun", "jul",
        "aug", "sep", "sept", "oct", "nov", "dec", "approx", "dept", "est", "mt",
    ]
    .into_iter()
    .collect()
});

/// Characters kept inside a word (`state-of-the-art`, `don't`, `AT&T`, `snake_case`).
fn is_word_inner(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '\'' | '’' | '-' | '.' | '&' | '_')
}

fn is_edge_punct(c: char) -> bool {
    !c.is_alphanumeric() && c != '@' && c != '_'
}

/// Whether a whitespace-delimited chunk looks like a URL.
pub fn looks_like_url(s: &str) -> bool {
    let lower = s.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || lower.contains("://")
}

/// Whether a chunk looks like an e-mail address.
pub fn looks_like_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Tokenize `text` and assign sentence indices.
pub fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    for (offset, chunk) in whitespace_chunks(text) {
        split_chunk(chunk, offset, &mut tokens);
    }
    assign_sentences(&mut tokens);
    tokens
}

/// Number of sentences that contain at least one non-punctuation token.
pub fn count_sentences(tokens: &[RawToken]) -> usize {
    let mut seen: HashSet<usize> = HashSet::new();
    for t in tokens {
        if t.kind != TokenKind::Punct {
            seen.insert(t.sentence);
        }
    }
    seen.len()
}

fn whitespace_chunks(text: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                chunks.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        chunks.push((s, &text[s..]));
    }
    chunks
}

fn push(tokens: &mut Vec<RawToken>, text: &str, start: usize, kind: TokenKind) {
    tokens.push(RawToken {
        text: text.to_string(),
        start,
        end: start + text.len(),
        kind,
        sentence: 0,
    });
}

fn split_chunk(chunk: &str, offset: usize, tokens: &mut Vec<RawToken>) {
    // URLs keep everything but a trailing sentence mark.
    if looks_like_url(chunk) {
        let core = chunk.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '"', '\'']);
        push(tokens, core, offset, TokenKind::Url);
        push_trailing(&chunk[core.len()..], offset + core.len(), tokens);
        return;
    }

    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut lo = 0;
    while lo < chars.len() && is_edge_punct(chars[lo].1) {
        let (i, c) = chars[lo];
        push(tokens, &chunk[i..i + c.len_utf8()], offset + i, TokenKind::Punct);
        lo += 1;
    }
    if lo == chars.len() {
        return;
    }

    let mut hi = chars.len();
    while hi > lo && is_edge_punct(chars[hi - 1].1) {
        hi -= 1;
    }

    let core_start = chars[lo].0;
    let mut core_end = chars.get(hi).map(|(i, _)| *i).unwrap_or(chunk.len());
    // "Dr." / "Inc." / "U.S." keep their period.
    if hi < chars.len() && chars[hi].1 == '.' {
        let candidate = chunk[core_start..core_end].to_lowercase();
        let dotted_initials = candidate.contains('.') && candidate.len() <= 4;
        if ABBREVIATIONS.contains(candidate.as_str()) || dotted_initials {
            core_end += 1;
        }
    }

    let core = &chunk[core_start..core_end];
    split_core(core, offset + core_start, tokens);
    push_trailing(&chunk[core_end..], offset + core_end, tokens);
}

fn push_trailing(rest: &str, offset: usize, tokens: &mut Vec<RawToken>) {
    // "..." stays a single token; everything else is one char per token.
    if rest.starts_with("...") {
        push(tokens, "...", offset, TokenKind::Punct);
        push_trailing(&rest[3..], offset + 3, tokens);
        return;
    }
    for (i, c) in rest.char_indices() {
        push(tokens, &rest[i..i + c.len_utf8()], offset + i, TokenKind::Punct);
    }
}

fn split_core(core: &str, offset: usize, tokens: &mut Vec<RawToken>) {
    if looks_like_email(core) {
        push(tokens, core, offset, TokenKind::Email);
        return;
    }
    if NUMBER_RE.is_match(core) || NUMERIC_WORD_RE.is_match(core) {
        push(tokens, core, offset, TokenKind::Number);
        return;
    }

    // Break on punctuation that cannot live inside a word ("and/or", "a,b").
    let mut piece_start: Option<usize> = None;
    for (i, c) in core.char_indices() {
        if is_word_inner(c) {
            if piece_start.is_none() {
                piece_start = Some(i);
            }
        } else {
            if let Some(s) = piece_start.take() {
                push_word(&core[s..i], offset + s, tokens);
            }
            push(tokens, &core[i..i + c.len_utf8()], offset + i, TokenKind::Punct);
        }
    }
    if let Some(s) = piece_start {
        push_word(&core[s..], offset + s, tokens);
    }
}

fn push_word(word: &str, offset: usize, tokens: &mut Vec<RawToken>) {
    // Possessive clitic becomes its own token, as in "company 's".
    for clitic in ["'s", "’s"] {
        if word.len() > clitic.len() + 1 && word.ends_with(clitic) {
            let split = word.len() - clitic.len();
            push(tokens, &word[..split], offset, kind_of(&word[..split]));
            push(tokens, &word[split..], offset + split, TokenKind::Word);
            return;
        }
    }
    push(tokens, word, offset, kind_of(word));
}

fn kind_of(word: &str) -> TokenKind {
    if NUMBER_RE.is_match(word) {
        TokenKind::Number
    } else if word.chars().any(char::is_alphanumeric) {
        TokenKind::Word
    } else {
        TokenKind::Punct
    }
}

fn assign_sentences(tokens: &mut [RawToken]) {
    let mut sentence = 0;
    let mut pending_break = false;
    for t in tokens.iter_mut() {
        let is_terminal =
            t.kind == TokenKind::Punct && matches!(t.text.as_str(), "." | "!" | "?" | "...");
        if pending_break && !is_terminal && !is_closing(&t.text) {
            sentence += 1;
            pending_break = false;
        }
        t.sentence = sentence;
        if is_terminal {
            pending_break = true;
        }
    }
}

fn is_closing(s: &str) -> bool {
    matches!(s, "\"" | "'" | ")" | "]" | "”" | "’")
}
