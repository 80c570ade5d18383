//! LLM configuration persistence and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{CompletionParams, LLMProvider};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Stored LLM configuration (persisted to llm-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
    #[serde(default = "default_groq_base_url")]
    pub groq_base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}
fn default_openai_base_url() -> String {
    OPENAI_BASE_URL.into()
}
fn default_anthropic_base_url() -> String {
    ANTHROPIC_BASE_URL.into()
}
fn default_groq_base_url() -> String {
    GROQ_BASE_URL.into()
}
fn default_temperature() -> f64 {
    CompletionParams::default().temperature
}
fn default_max_tokens() -> usize {
    CompletionParams::default().max_tokens
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            groq_base_url: default_groq_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// The provider a completion backend should talk to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub provider: LLMProvider,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config: LLMConfig = match std::fs::read_to_string(config_path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                LLMConfig::default()
            }),
            Err(_) => LLMConfig::default(),
        };

        // Env vars as fallback for API keys
        if config.openai_api_key.is_none() {
            config.openai_api_key = env_key("OPENAI_API_KEY");
        }
        if config.anthropic_api_key.is_none() {
            config.anthropic_api_key = env_key("ANTHROPIC_API_KEY");
        }
        if config.groq_api_key.is_none() {
            config.groq_api_key = env_key("GROQ_API_KEY");
        }

        config
    }

    pub fn params(&self) -> CompletionParams {
        CompletionParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Resolve which provider, model and endpoint to use.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        // Explicit preference
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "openai" => self.resolved(LLMProvider::OpenAI),
                "anthropic" => self.resolved(LLMProvider::Anthropic),
                "groq" => self.resolved(LLMProvider::Groq),
                _ => None,
            };
        }

        // Auto mode: Anthropic > Groq > OpenAI
        [LLMProvider::Anthropic, LLMProvider::Groq, LLMProvider::OpenAI]
            .into_iter()
            .find_map(|p| self.resolved(p))
    }

    fn resolved(&self, provider: LLMProvider) -> Option<ResolvedProvider> {
        let (key, model, base_url) = match provider {
            LLMProvider::OpenAI => (
                &self.openai_api_key,
                &self.openai_model,
                &self.openai_base_url,
            ),
            LLMProvider::Anthropic => (
                &self.anthropic_api_key,
                &self.anthropic_model,
                &self.anthropic_base_url,
            ),
            LLMProvider::Groq => (&self.groq_api_key, &self.groq_model, &self.groq_base_url),
        };
        key.as_ref().map(|k| ResolvedProvider {
            provider,
            model: model.clone(),
            api_key: k.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

fn env_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_auto_prefers_anthropic_then_groq() {
        let mut config = LLMConfig {
            openai_api_key: Some("sk-openai".into()),
            groq_api_key: Some("gsk".into()),
            ..LLMConfig::default()
        };
        assert_eq!(config.resolve_provider().unwrap().provider, LLMProvider::Groq);

        config.anthropic_api_key = Some("sk-ant".into());
        let resolved = config.resolve_provider().unwrap();
        assert_eq!(resolved.provider, LLMProvider::Anthropic);
        assert_eq!(resolved.base_url, ANTHROPIC_BASE_URL);
    }

    #[test]
    fn test_explicit_preference_requires_key() {
        let config = LLMConfig {
            preferred_provider: "openai".into(),
            groq_api_key: Some("gsk".into()),
            ..LLMConfig::default()
        };
        assert!(config.resolve_provider().is_none());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("llm-config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = LLMConfig::load(&path);
        assert_eq!(loaded.preferred_provider, "auto");
        assert_eq!(loaded.groq_model, DEFAULT_GROQ_MODEL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("llm-config.json");
        std::fs::write(
            &path,
            r#"{"preferred_provider": "groq", "groq_api_key": "gsk-file",
                "groq_base_url": "http://localhost:9999/v1/", "max_tokens": 256}"#,
        )
        .unwrap();

        let loaded = LLMConfig::load(&path);
        let resolved = loaded.resolve_provider().unwrap();
        assert_eq!(resolved.api_key, "gsk-file");
        assert_eq!(resolved.base_url, "http://localhost:9999/v1");
        assert_eq!(loaded.params().max_tokens, 256);
        assert_eq!(loaded.params().temperature, 0.3);
    }
}
