//! Lexiscope Runtime: runs the lexical and narrative analyzers side by side,
//! merges their output into one [`lexiscope_core::AnalysisRecord`] and hands
//! it to the store.

pub mod orchestrator;
pub mod types;

pub use orchestrator::AnalysisPipeline;
pub use types::*;
