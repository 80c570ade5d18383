//! External LLM completion clients.
//!
//! OpenAI and Groq share the chat-completions format; Anthropic uses the
//! Messages API with a separate system prompt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lexiscope_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::{LLMConfig, ResolvedProvider};
use crate::types::{ChatMessage, CompletionParams, LLMProvider};

/// A remote text-completion capability.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Model identifier used for requests.
    fn model(&self) -> &str;

    /// Send the conversation and return the assistant's text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Non-streaming client for one resolved provider.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    target: ResolvedProvider,
    params: CompletionParams,
}

impl ProviderClient {
    pub fn new(
        target: ResolvedProvider,
        params: CompletionParams,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            target,
            params,
        })
    }

    async fn complete_openai_compat(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.target.base_url);
        let body = json!({
            "model": self.target.model,
            "messages": messages,
            "temperature": self.params.temperature,
            "max_tokens": self.params.max_tokens,
        });

        debug!("Requesting completion from {} with model {}", url, self.target.model);
        let parsed = self
            .send(
                self.client
                    .post(&url)
                    .header("Authorization", format!("Bearer {}", self.target.api_key)),
                &body,
            )
            .await?;

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| Error::Completion("Response has no message content".into()))
    }

    async fn complete_anthropic(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/messages", self.target.base_url);
        let system: Option<&str> = messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.as_str());
        let conversation: Vec<&ChatMessage> =
            messages.iter().filter(|m| m.role != "system").collect();

        let mut body = json!({
            "model": self.target.model,
            "messages": conversation,
            "temperature": self.params.temperature,
            "max_tokens": self.params.max_tokens,
        });
        if let Some(sys) = system {
            body["system"] = json!(sys);
        }

        debug!("Requesting completion from Anthropic with model {}", self.target.model);
        let parsed = self
            .send(
                self.client
                    .post(&url)
                    .header("x-api-key", &self.target.api_key)
                    .header("anthropic-version", "2023-06-01"),
                &body,
            )
            .await?;

        let text: String = parsed["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter(|b| b["type"] == "text")
                    .filter_map(|b| b["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(Error::Completion("Response has no text content".into()));
        }
        Ok(text.trim().to_string())
    }

    async fn send(&self, request: reqwest::RequestBuilder, body: &Value) -> Result<Value> {
        let response = request
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Completion(format!("Request timed out: {}", e))
                } else {
                    Error::Completion(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!("{} API error {}: {}", self.target.provider, status, text);
            return Err(Error::Completion(format!("API error {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Completion(format!("Invalid response body: {}", e)))
    }
}

#[async_trait]
impl CompletionBackend for ProviderClient {
    fn model(&self) -> &str {
        &self.target.model
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.target.provider {
            LLMProvider::OpenAI | LLMProvider::Groq => self.complete_openai_compat(messages).await,
            LLMProvider::Anthropic => self.complete_anthropic(messages).await,
        }
    }
}

/// Create a completion backend from the stored configuration.
///
/// Returns `None` when no provider has an API key; analysis then runs
/// offline.
pub fn create_backend(config: &LLMConfig, timeout: Duration) -> Option<Arc<dyn CompletionBackend>> {
    let Some(target) = config.resolve_provider() else {
        info!("No LLM API key configured, narrative analysis will run offline");
        return None;
    };
    let provider = target.provider;
    let model = target.model.clone();
    match ProviderClient::new(target, config.params(), timeout) {
        Ok(client) => {
            info!("Using {} for narrative analysis (model {})", provider, model);
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Failed to create {} client: {}", provider, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(provider: LLMProvider, base_url: String) -> ResolvedProvider {
        ResolvedProvider {
            provider,
            model: "test-model".into(),
            api_key: "test-key".into(),
            base_url,
        }
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("Be terse."), ChatMessage::user("Hello")]
    }

    #[tokio::test]
    async fn test_openai_compatible_completion() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  hi there "}}]}"#)
            .create_async()
            .await;

        let client = ProviderClient::new(
            target(LLMProvider::Groq, server.url()),
            CompletionParams::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        let text = client.complete(&messages()).await.unwrap();
        assert_eq!(text, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_anthropic_completion_moves_system_prompt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(mockito::Matcher::PartialJson(json!({"system": "Be terse."})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"hello"}]}"#)
            .create_async()
            .await;

        let client = ProviderClient::new(
            target(LLMProvider::Anthropic, server.url()),
            CompletionParams::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.complete(&messages()).await.unwrap(), "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":"bad key"}"#)
            .create_async()
            .await;

        let client = ProviderClient::new(
            target(LLMProvider::OpenAI, server.url()),
            CompletionParams::default(),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = client.complete(&messages()).await.unwrap_err();
        assert!(matches!(err, Error::Completion(ref m) if m.contains("401")), "{err}");
    }

    #[test]
    fn test_create_backend_without_keys() {
        let config = LLMConfig {
            preferred_provider: "openai".into(),
            ..LLMConfig::default()
        };
        assert!(create_backend(&config, Duration::from_secs(1)).is_none());
    }
}
