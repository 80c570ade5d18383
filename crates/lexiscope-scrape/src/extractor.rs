//! Fetch a page over HTTP and reduce it to analyzable text.

use std::time::Duration;

use chrono::{DateTime, Utc};
use lexiscope_core::{Error, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::html::{clean_content, parse_page};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MIN_CONTENT_CHARS: usize = 50;

/// Readable text extracted from one page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedPage {
    pub content: String,
    pub title: String,
    /// The URL actually fetched, after normalization.
    pub url: String,
    pub word_count: usize,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PageExtractor {
    client: Client,
}

impl PageExtractor {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub async fn extract(&self, raw_url: &str) -> Result<ExtractedPage> {
        let url = normalize_url(raw_url)?;
        info!("Extracting content from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch URL: {}", e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("Failed to fetch URL: HTTP {}", status)));
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

        let page = parse_page(&body);
        let content = clean_content(&page.content);
        if content.chars().count() < MIN_CONTENT_CHARS {
            return Err(Error::Extraction(
                "Could not extract meaningful content from the URL".into(),
            ));
        }

        let word_count = content.split_whitespace().count();
        debug!("Extracted {} words titled {:?}", word_count, page.title);
        Ok(ExtractedPage {
            content,
            title: page.title,
            url: url.to_string(),
            word_count,
            extracted_at: Utc::now(),
        })
    }
}

/// Parse a user-supplied URL, defaulting to `https://` when no scheme is
/// given. Only http(s) URLs with a host are accepted.
pub fn normalize_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Validation("URL is required".into()));
    }
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::Validation(format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Validation(format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Validation("Invalid URL format: missing host".into()));
    }
    Ok(url)
}
