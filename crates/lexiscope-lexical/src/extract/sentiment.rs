//! Lexicon polarity score over lemmas.

use lexiscope_core::Result;

use crate::pipeline::AnnotatedDoc;

const POSITIVE: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "best",
];
const NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "worst", "disappointing",
];

/// `(positive − negative) / (positive + negative)`, or 0.0 with no hits.
pub fn score(doc: &AnnotatedDoc) -> Result<f64> {
    let (mut positive, mut negative) = (0usize, 0usize);
    for token in &doc.tokens {
        let lemma = token.lemma.to_lowercase();
        if POSITIVE.contains(&lemma.as_str()) {
            positive += 1;
        } else if NEGATIVE.contains(&lemma.as_str()) {
            negative += 1;
        }
    }
    let total = positive + negative;
    if total == 0 {
        return Ok(0.0);
    }
    Ok((positive as f64 - negative as f64) / total as f64)
}
