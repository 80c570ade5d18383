//! Lexiscope Lexical: tokenization, tagging, entity recognition and lexical
//! insight extraction (keywords, entities, phrases, sentiment, readability).

pub mod extract;
pub mod heuristic;
pub mod lemma;
pub mod ner;
pub mod pipeline;
pub mod simple;
pub mod stopwords;
pub mod tagger;
pub mod tokenize;

pub use extract::{InsightExtractor, TextInsights};
pub use heuristic::HeuristicPipeline;
pub use pipeline::{
    create_pipeline, AnnotatedDoc, EntityLabel, EntitySpan, NlpPipeline, PosTag, Token,
};
