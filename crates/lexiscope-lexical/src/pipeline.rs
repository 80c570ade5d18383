//! NLP pipeline trait and annotated document types.

use std::ops::Range;
use std::sync::Arc;

use lexiscope_core::{LexicalConfig, NlpMode, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::heuristic::HeuristicPipeline;
pub use crate::ner::{EntityLabel, EntitySpan};
pub use crate::tagger::PosTag;

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_space: bool,
    pub like_email: bool,
    pub like_url: bool,
    /// Byte offsets into the annotated text.
    pub start: usize,
    pub end: usize,
    pub sentence: usize,
}

/// Output of [`NlpPipeline::annotate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDoc {
    pub tokens: Vec<Token>,
    pub entities: Vec<EntitySpan>,
    /// Base noun phrases as token index ranges.
    pub noun_chunks: Vec<Range<usize>>,
    pub sentence_count: usize,
}

impl AnnotatedDoc {
    /// Tokens of a noun chunk, or `None` if the range does not fit the document.
    pub fn chunk_tokens(&self, range: &Range<usize>) -> Option<&[Token]> {
        self.tokens.get(range.clone())
    }
}

/// Trait for linguistic annotation backends.
pub trait NlpPipeline: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Whether annotation can currently be performed.
    fn is_available(&self) -> bool;

    /// Tokenize, tag, lemmatize and find entities and noun chunks.
    fn annotate(&self, text: &str) -> Result<AnnotatedDoc>;
}

/// Create the best available pipeline for the configuration.
///
/// Returns `None` when annotation is disabled; callers then take the
/// degraded keyword-only path.
pub fn create_pipeline(config: &LexicalConfig) -> Option<Arc<dyn NlpPipeline>> {
    match config.nlp {
        NlpMode::Heuristic => {
            let pipeline = HeuristicPipeline::new();
            info!("Using {} NLP pipeline", pipeline.name());
            Some(Arc::new(pipeline))
        }
        NlpMode::Off => {
            info!("NLP pipeline disabled, lexical insights will be degraded");
            None
        }
    }
}
