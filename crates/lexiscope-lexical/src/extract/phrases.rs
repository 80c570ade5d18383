//! Key phrases from noun chunks.

use std::collections::HashSet;

use lexiscope_core::{Error, Result};

use crate::pipeline::AnnotatedDoc;

/// Noun chunks of two to four words with no stopword and more than five
/// characters, deduplicated in order of appearance.
pub fn extract(text: &str, doc: &AnnotatedDoc, count: usize) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut phrases = Vec::new();
    for range in &doc.noun_chunks {
        let tokens = doc
            .chunk_tokens(range)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Nlp(format!("noun chunk {:?} outside document", range)))?;
        let (first, last) = (&tokens[0], &tokens[tokens.len() - 1]);
        let phrase = text
            .get(first.start..last.end)
            .ok_or_else(|| Error::Nlp(format!("noun chunk {:?} does not map to text", range)))?
            .trim();

        let words = phrase.split_whitespace().count();
        if (2..=4).contains(&words)
            && !tokens.iter().any(|t| t.is_stop)
            && phrase.chars().count() > 5
            && seen.insert(phrase.to_string())
        {
            phrases.push(phrase.to_string());
        }
    }
    phrases.truncate(count);
    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::HeuristicPipeline;
    use crate::pipeline::NlpPipeline;

    fn phrases(text: &str, count: usize) -> Vec<String> {
        let doc = HeuristicPipeline::new().annotate(text).unwrap();
        extract(text, &doc, count).unwrap()
    }

    #[test]
    fn test_filters_stopwords_and_length() {
        let found = phrases(
            "Customer service was slow. The old baseline failed. Battery life improved. \
             Customer service improved.",
            5,
        );
        assert_eq!(found, vec!["Customer service", "Battery life"]);
    }

    #[test]
    fn test_count_limit() {
        let found = phrases("Solar panels help. Wind turbines turn. Heat pumps work.", 2);
        assert_eq!(found, vec!["Solar panels", "Wind turbines"]);
    }

    #[test]
    fn test_bad_range_is_error() {
        let mut doc = HeuristicPipeline::new().annotate("Fresh bread").unwrap();
        doc.noun_chunks = vec![3..9];
        assert!(matches!(extract("Fresh bread", &doc, 3), Err(Error::Nlp(_))));
    }
}
