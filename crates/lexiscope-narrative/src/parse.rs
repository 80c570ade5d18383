//! Strict parsing of completion responses with a named fallback.

use lexiscope_core::{Outcome, Sentiment};
use serde_json::Value;

use crate::types::NarrativeAnalysis;

const DEFAULT_CONFIDENCE: f64 = 0.8;
const FALLBACK_CONFIDENCE: f64 = 0.5;
const FALLBACK_SUMMARY_CHARS: usize = 200;
const MAX_TOPICS: usize = 3;

/// A completion response, either a valid analysis or raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    Structured(NarrativeAnalysis),
    Unstructured(String),
}

impl ParsedResponse {
    pub fn parse(raw: &str) -> Self {
        let body = strip_code_fence(raw.trim());
        match serde_json::from_str::<Value>(body) {
            Ok(value) => match validate(&value) {
                Some(analysis) => Self::Structured(analysis),
                None => Self::Unstructured(raw.trim().to_string()),
            },
            Err(_) => Self::Unstructured(raw.trim().to_string()),
        }
    }

    /// Structured responses succeed; raw text becomes a degraded analysis
    /// whose summary is the start of the text.
    pub fn into_outcome(self) -> Outcome<NarrativeAnalysis> {
        match self {
            Self::Structured(analysis) => Outcome::Success(analysis),
            Self::Unstructured(raw) => Outcome::degraded(
                fallback_analysis(&raw),
                "Completion response was not a valid analysis",
            ),
        }
    }
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn validate(value: &Value) -> Option<NarrativeAnalysis> {
    let summary = value["summary"].as_str()?.trim().to_string();
    if summary.is_empty() {
        return None;
    }

    let title = value["title"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let topics: Vec<String> = value["topics"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .take(MAX_TOPICS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let sentiment = value["sentiment"]
        .as_str()
        .map(Sentiment::normalize)
        .unwrap_or(Sentiment::Neutral);

    let confidence = match &value["confidence_score"] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|c| c.is_finite())
    .unwrap_or(DEFAULT_CONFIDENCE)
    .clamp(0.0, 1.0);

    Some(NarrativeAnalysis {
        summary,
        title,
        topics,
        sentiment,
        confidence_score: confidence,
    })
}

fn fallback_analysis(raw: &str) -> NarrativeAnalysis {
    let summary = if raw.chars().count() > FALLBACK_SUMMARY_CHARS {
        let head: String = raw.chars().take(FALLBACK_SUMMARY_CHARS).collect();
        format!("{}...", head)
    } else {
        raw.to_string()
    };
    NarrativeAnalysis {
        summary,
        title: None,
        topics: ["general", "text", "analysis"].map(String::from).to_vec(),
        sentiment: Sentiment::Neutral,
        confidence_score: FALLBACK_CONFIDENCE,
    }
}
