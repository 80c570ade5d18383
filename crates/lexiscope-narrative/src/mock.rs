//! Offline narrative analysis from word counts and a small polarity lexicon.

use std::collections::HashSet;

use lexiscope_core::Sentiment;

use crate::types::NarrativeAnalysis;

const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "happy", "joy",
];
const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "hate", "sad", "angry", "disappointed", "frustrated",
];

/// Deterministic analysis used when no completion backend is reachable.
pub fn mock_analysis(text: &str) -> NarrativeAnalysis {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();
    let normalized: Vec<String> = words
        .iter()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .collect();

    let positive = normalized.iter().filter(|w| POSITIVE.contains(&w.as_str())).count();
    let negative = normalized.iter().filter(|w| NEGATIVE.contains(&w.as_str())).count();
    let (sentiment, confidence) = if positive > negative {
        (Sentiment::Positive, lean_confidence(positive - negative))
    } else if negative > positive {
        (Sentiment::Negative, lean_confidence(negative - positive))
    } else {
        (Sentiment::Neutral, 0.6)
    };

    let topic_words = topic_words(&normalized);
    let discussed = if topic_words.is_empty() {
        "general content".to_string()
    } else {
        topic_words.iter().take(2).cloned().collect::<Vec<_>>().join(", ")
    };
    let topics = if topic_words.is_empty() {
        ["text", "analysis", "content"].map(String::from).to_vec()
    } else {
        topic_words
    };

    NarrativeAnalysis {
        summary: format!(
            "This text contains {} words and appears to be {} in sentiment. It discusses topics related to {}.",
            word_count, sentiment, discussed
        ),
        title: Some(format!("Analysis of {} word text", word_count)),
        topics,
        sentiment,
        confidence_score: confidence,
    }
}

fn lean_confidence(margin: usize) -> f64 {
    (0.5 + margin as f64 * 0.1).min(0.8)
}

/// Up to three distinct alphabetic words longer than four characters,
/// longest first; equal lengths keep text order.
fn topic_words(normalized: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<&String> = normalized
        .iter()
        .filter(|w| w.chars().count() > 4 && w.chars().all(char::is_alphabetic))
        .filter(|w| seen.insert(w.as_str()))
        .collect();
    candidates.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    candidates.into_iter().take(3).cloned().collect()
}
