//! Keyword extraction without an annotation pipeline.
//!
//! Used when no [`crate::NlpPipeline`] is configured or annotation fails:
//! punctuation is stripped, stopwords and short words dropped, and the
//! remaining words tagged without case information. Nouns are counted as
//! written (no lemmatization).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::keywords::top_by_frequency;
use crate::stopwords::is_stopword;
use crate::tagger::tag_words;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Most frequent nouns of `text`, at most `count`.
pub fn fallback_keywords(text: &str, count: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let words: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| !is_stopword(w) && w.chars().count() > 2)
        .collect();

    let tags = tag_words(&words);
    let nouns = words
        .iter()
        .zip(tags)
        .filter(|(_, pos)| pos.is_nominal())
        .map(|(w, _)| (*w).to_string());
    top_by_frequency(nouns, count)
}
