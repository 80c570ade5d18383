//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Paths to all Lexiscope data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// SQLite database file (`data/lexiscope.db`).
    pub database: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates the root if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            database: root.join("lexiscope.db"),
            llm_config_file: root.join("llm-config.json"),
            root,
        })
    }
}

/// Which NLP capability backs the lexical extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NlpMode {
    /// Built-in rule-based tagger and entity recogniser.
    Heuristic,
    /// No annotation capability; keyword-only fallback.
    Off,
}

/// Which datastore backs persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Sqlite,
    /// Demo mode: records are returned but never persisted.
    Off,
}

/// Tunables for the lexical insight extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalConfig {
    pub nlp: NlpMode,
    pub keyword_count: usize,
    pub phrase_count: usize,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            nlp: NlpMode::Heuristic,
            keyword_count: 3,
            phrase_count: 3,
        }
    }
}

/// Top-level Lexiscope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiscopeConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    pub store: StoreMode,
    pub lexical: LexicalConfig,
    /// Upper bound on a single remote completion call, in seconds.
    pub llm_timeout_secs: u64,
}

impl LexiscopeConfig {
    /// Create configuration from environment and defaults.
    ///
    /// A `.env` file in the working directory (or its parent) is loaded first
    /// when present; variables already set in the process win.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        let _ = dotenvy::from_path("../.env");

        let port = env_parse("PORT").unwrap_or(8000);
        let llm_timeout_secs = env_parse("LEXISCOPE_LLM_TIMEOUT_SECS").unwrap_or(20);

        let nlp = match std::env::var("LEXISCOPE_NLP").ok().as_deref() {
            Some("off") | Some("none") => NlpMode::Off,
            _ => NlpMode::Heuristic,
        };
        let store = match std::env::var("LEXISCOPE_STORE").ok().as_deref() {
            Some("off") | Some("none") => StoreMode::Off,
            _ => StoreMode::Sqlite,
        };

        let defaults = LexicalConfig::default();
        let lexical = LexicalConfig {
            nlp,
            keyword_count: env_parse("LEXISCOPE_KEYWORD_COUNT").unwrap_or(defaults.keyword_count),
            phrase_count: env_parse("LEXISCOPE_PHRASE_COUNT").unwrap_or(defaults.phrase_count),
        };

        Ok(Self {
            port,
            data_paths: DataPaths::new(data_dir)?,
            store,
            lexical,
            llm_timeout_secs,
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
