//! Narrative analyzer: remote completion with offline fallback.

use std::sync::Arc;
use std::time::Duration;

use lexiscope_core::Outcome;
use tracing::{debug, warn};

use crate::mock::mock_analysis;
use crate::parse::ParsedResponse;
use crate::prompt::analysis_messages;
use crate::providers::CompletionBackend;
use crate::types::NarrativeAnalysis;

/// Produces a [`NarrativeAnalysis`] for a text. Never fails: without a
/// backend, or when the remote call errors or times out, the offline
/// analysis is returned as a degraded outcome.
#[derive(Clone)]
pub struct NarrativeAnalyzer {
    backend: Option<Arc<dyn CompletionBackend>>,
    timeout: Duration,
}

impl NarrativeAnalyzer {
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.model())
    }

    pub async fn analyze(&self, text: &str) -> Outcome<NarrativeAnalysis> {
        let Some(backend) = &self.backend else {
            return Outcome::degraded(
                mock_analysis(text),
                "LLM unavailable, using offline analysis",
            );
        };

        let messages = analysis_messages(text);
        let reason = match tokio::time::timeout(self.timeout, backend.complete(&messages)).await {
            Ok(Ok(raw)) => {
                debug!("Completion returned {} characters", raw.len());
                return ParsedResponse::parse(&raw).into_outcome();
            }
            Ok(Err(e)) => format!("LLM request failed: {}", e),
            Err(_) => format!("LLM request timed out after {:?}", self.timeout),
        };

        warn!("{}, using offline analysis", reason);
        Outcome::degraded(mock_analysis(text), reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use async_trait::async_trait;
    use lexiscope_core::{Error, Result, Sentiment};

    struct Scripted(std::result::Result<&'static str, &'static str>);

    #[async_trait]
    impl CompletionBackend for Scripted {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|e| Error::Completion(e.to_string()))
        }
    }

    struct Stalled;

    #[async_trait]
    impl CompletionBackend for Stalled {
        fn model(&self) -> &str {
            "stalled"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("{}".into())
        }
    }

    fn analyzer(backend: impl CompletionBackend + 'static) -> NarrativeAnalyzer {
        NarrativeAnalyzer::new(Some(Arc::new(backend)), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_structured_success() {
        let a = analyzer(Scripted(Ok(
            r#"{"summary":"Praise for a product.","title":"Review","topics":["product"],"sentiment":"positive","confidence_score":0.9}"#,
        )));
        let outcome = a.analyze("I love it").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.value().unwrap().summary, "Praise for a product.");
    }

    #[tokio::test]
    async fn test_unparseable_response_degrades() {
        let a = analyzer(Scripted(Ok("Sure! The text is upbeat.")));
        let outcome = a.analyze("I love it").await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value().unwrap().summary, "Sure! The text is upbeat.");
    }

    #[tokio::test]
    async fn test_backend_error_uses_offline_analysis() {
        let a = analyzer(Scripted(Err("connection refused")));
        let outcome = a.analyze("I love this amazing product, it works great!").await;
        assert!(outcome.reason().unwrap().contains("connection refused"));
        let value = outcome.into_value().unwrap();
        assert_eq!(value.sentiment, Sentiment::Positive);
        assert!(value.confidence_score >= 0.5);
    }

    #[tokio::test]
    async fn test_timeout_uses_offline_analysis() {
        let outcome = analyzer(Stalled).analyze("A calm day.").await;
        assert!(outcome.is_degraded());
        assert!(outcome.reason().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_no_backend() {
        let a = NarrativeAnalyzer::new(None, Duration::from_secs(1));
        assert!(!a.is_available());
        let outcome = a.analyze("Some words here.").await;
        assert!(outcome.is_degraded());
        assert!(outcome.value().unwrap().title.is_some());
    }
}
