//! Length-based readability score.

use lexiscope_core::{Error, Result};

/// `0.39 × words-per-sentence + 11.8 × characters-per-word − 15.59`, clamped
/// to [0, 100]. Words are whitespace-separated and keep their punctuation;
/// sentences are non-blank segments between periods.
pub fn score(text: &str) -> Result<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(0.0);
    }
    let sentences = text.split('.').filter(|s| !s.trim().is_empty()).count().max(1);

    let avg_words_per_sentence = words.len() as f64 / sentences as f64;
    let avg_word_length =
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words.len() as f64;

    let raw = avg_words_per_sentence * 0.39 + avg_word_length * 11.8 - 15.59;
    if !raw.is_finite() {
        return Err(Error::Nlp(format!("readability score not finite: {}", raw)));
    }
    Ok(raw.clamp(0.0, 100.0))
}
