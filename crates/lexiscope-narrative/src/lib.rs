//! Narrative analysis (summary, title, topics, sentiment) through an external
//! LLM completion API, with a deterministic offline fallback.

pub mod analyzer;
pub mod config;
pub mod mock;
pub mod parse;
pub mod prompt;
pub mod providers;
pub mod types;

pub use analyzer::NarrativeAnalyzer;
pub use config::LLMConfig;
pub use providers::{create_backend, CompletionBackend, ProviderClient};
pub use types::*;
