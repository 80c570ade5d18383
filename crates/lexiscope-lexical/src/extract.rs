//! Lexical insight extraction over an annotated document.
//!
//! Keywords, entities, phrases, a lexicon sentiment score and a readability
//! score are computed independently; a failing sub-extraction contributes its
//! default and marks the whole result as degraded.

pub mod entities;
pub mod keywords;
pub mod phrases;
pub mod readability;
pub mod sentiment;

use std::sync::Arc;

use lexiscope_core::{EntityGroups, LexicalConfig, Outcome, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::pipeline::{create_pipeline, NlpPipeline};
use crate::simple::fallback_keywords;

/// Combined lexical insights for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInsights {
    pub keywords: Vec<String>,
    pub entities: EntityGroups,
    pub phrases: Vec<String>,
    /// Lexicon polarity in [-1, 1].
    pub sentiment_score: f64,
    /// Length-based difficulty in [0, 100].
    pub readability_score: f64,
    pub word_count: usize,
    pub sentence_count: usize,
}

/// Runs lexical extraction, falling back to keyword-only output when no
/// annotation pipeline is usable.
#[derive(Clone)]
pub struct InsightExtractor {
    pipeline: Option<Arc<dyn NlpPipeline>>,
    keyword_count: usize,
    phrase_count: usize,
}

impl InsightExtractor {
    pub fn new(pipeline: Option<Arc<dyn NlpPipeline>>, config: &LexicalConfig) -> Self {
        Self {
            pipeline,
            keyword_count: config.keyword_count,
            phrase_count: config.phrase_count,
        }
    }

    /// Build with the pipeline selected by `config`.
    pub fn from_config(config: &LexicalConfig) -> Self {
        Self::new(create_pipeline(config), config)
    }

    /// Whether the full (non-degraded) path is available.
    pub fn is_available(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| p.is_available())
    }

    pub fn pipeline_name(&self) -> Option<&str> {
        self.pipeline.as_deref().map(|p| p.name())
    }

    pub fn extract_insights(&self, text: &str) -> Outcome<TextInsights> {
        let pipeline = match self.pipeline.as_ref() {
            Some(p) if p.is_available() => p,
            _ => return self.keywords_only(text, "NLP pipeline unavailable".to_string()),
        };

        let doc = match pipeline.annotate(text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Annotation with {} failed: {}", pipeline.name(), e);
                return self.keywords_only(text, format!("Annotation failed: {}", e));
            }
        };

        let mut failures = Vec::new();
        let insights = TextInsights {
            keywords: settle(
                "keywords",
                keywords::extract(&doc, self.keyword_count),
                &mut failures,
            ),
            entities: settle("entities", entities::extract(&doc), &mut failures),
            phrases: settle(
                "phrases",
                phrases::extract(text, &doc, self.phrase_count),
                &mut failures,
            ),
            sentiment_score: settle("sentiment", sentiment::score(&doc), &mut failures),
            readability_score: settle("readability", readability::score(text), &mut failures),
            word_count: doc.tokens.iter().filter(|t| !t.is_punct && !t.is_space).count(),
            sentence_count: doc.sentence_count,
        };
        debug!(
            keywords = insights.keywords.len(),
            entities = insights.entities.len(),
            phrases = insights.phrases.len(),
            "Extracted lexical insights"
        );

        if failures.is_empty() {
            Outcome::Success(insights)
        } else {
            Outcome::degraded(insights, failures.join("; "))
        }
    }

    fn keywords_only(&self, text: &str, reason: String) -> Outcome<TextInsights> {
        let insights = TextInsights {
            keywords: fallback_keywords(text, self.keyword_count),
            ..TextInsights::default()
        };
        Outcome::degraded(insights, reason)
    }
}

fn settle<T: Default>(what: &str, result: Result<T>, failures: &mut Vec<String>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to extract {}: {}", what, e);
        failures.push(format!("{} extraction failed: {}", what, e));
        T::default()
    })
}
