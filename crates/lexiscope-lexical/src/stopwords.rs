//! English stopword list shared by the tagger, keyword filter and phrase filter.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
        "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
        "anyone", "anything", "anywhere", "are", "around", "as", "at", "be", "became", "because",
        "become", "been", "before", "being", "below", "beside", "between", "beyond", "both",
        "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "done", "down",
        "during", "each", "either", "else", "enough", "even", "ever", "every", "everyone",
        "everything", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
        "in", "into", "is", "it", "its", "itself", "just", "least", "less", "made", "make",
        "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself", "neither",
        "never", "no", "nobody", "none", "nor", "not", "nothing", "now", "of", "off", "often",
        "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
        "ourselves", "out", "over", "own", "per", "perhaps", "please", "quite", "rather", "really",
        "same", "say", "see", "seem", "seemed", "seems", "several", "she", "should", "since",
        "so", "some", "someone", "something", "sometimes", "somewhere", "still", "such", "than",
        "that", "the", "their", "theirs", "them", "themselves", "then", "there", "therefore",
        "these", "they", "this", "those", "though", "through", "thus", "to", "together", "too",
        "toward", "towards", "under", "until", "up", "upon", "us", "used", "using", "very", "via",
        "was", "we", "well", "were", "what", "whatever", "when", "whenever", "where", "whereas",
        "wherever", "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why",
        "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
        "yourselves", "'s", "n't", "'re", "'ve", "'ll", "'d", "'m",
    ]
    .into_iter()
    .collect()
});

/// Whether a word (any casing) is an English stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word.to_lowercase().as_str())
}
