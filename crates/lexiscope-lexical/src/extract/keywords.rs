//! Frequency-ranked noun keywords.

use std::collections::HashMap;

use lexiscope_core::Result;

use crate::pipeline::AnnotatedDoc;

/// Most frequent noun lemmas, ties broken by first occurrence.
pub fn extract(doc: &AnnotatedDoc, count: usize) -> Result<Vec<String>> {
    let nouns = doc
        .tokens
        .iter()
        .filter(|t| {
            t.pos.is_nominal()
                && !t.is_stop
                && !t.is_punct
                && !t.is_space
                && t.text.chars().count() > 2
                && !t.like_email
                && !t.like_url
        })
        .map(|t| t.lemma.to_lowercase());
    Ok(top_by_frequency(nouns, count))
}

/// Count occurrences and keep the `n` most common, first-seen order on ties.
pub(crate) fn top_by_frequency(words: impl IntoIterator<Item = String>, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for word in words {
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(w, _)| w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::HeuristicPipeline;
    use crate::pipeline::NlpPipeline;

    #[test]
    fn test_top_by_frequency_tie_order() {
        let words = ["b", "a", "c", "a", "b", "d"].map(String::from);
        assert_eq!(top_by_frequency(words, 3), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lemmatized_nouns_only() {
        let doc = HeuristicPipeline::new()
            .annotate(
                "Cats chase mice. The cat sleeps while dogs bark at cats. \
                 Visit https://cats.example.",
            )
            .unwrap();
        let keywords = extract(&doc, 3).unwrap();
        assert_eq!(keywords[0], "cat");
        assert!(!keywords.iter().any(|k| k.contains("http")));
    }

    #[test]
    fn test_numbers_are_not_keywords() {
        let doc = HeuristicPipeline::new()
            .annotate(
                "The meeting starts at 9:30pm in the 1990s building. \
                 Revenue grew 12,345.67% that year.",
            )
            .unwrap();
        let keywords = extract(&doc, 5).unwrap();
        assert!(!keywords.is_empty());
        assert!(keywords.iter().all(|k| !k.chars().any(|c| c.is_ascii_digit())), "{keywords:?}");
    }

    #[test]
    fn test_respects_count() {
        let doc = HeuristicPipeline::new()
            .annotate("Apples, pears, plums, grapes and melons filled the market stall.")
            .unwrap();
        assert_eq!(extract(&doc, 2).unwrap().len(), 2);
        assert!(extract(&doc, 0).unwrap().is_empty());
    }
}
