//! Error types for Lexiscope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad caller input (blank text, missing search parameters, malformed URL).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("NLP error: {0}")]
    Nlp(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
