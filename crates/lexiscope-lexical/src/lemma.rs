//! Suffix-stripping lemmatizer.
//!
//! Inflectional only: plural nouns and verb forms (-s, -ed, -ing) are mapped
//! back to a base form using an irregular table and ordered suffix rules.
//! Derivational suffixes (-tion, -ness, ...) are left alone.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::tagger::PosTag;

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
        ("does", "do"), ("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"),
        ("made", "make"), ("said", "say"), ("got", "get"), ("gotten", "get"),
        ("took", "take"), ("taken", "take"), ("came", "come"), ("saw", "see"),
        ("seen", "see"), ("knew", "know"), ("known", "know"), ("thought", "think"),
        ("told", "tell"), ("felt", "feel"), ("found", "find"), ("gave", "give"),
        ("given", "give"), ("left", "leave"), ("bought", "buy"), ("brought", "bring"),
        ("built", "build"), ("wrote", "write"), ("written", "write"), ("ran", "run"),
        ("began", "begin"), ("begun", "begin"), ("kept", "keep"), ("held", "hold"),
        ("stood", "stand"), ("understood", "understand"), ("spent", "spend"),
        ("sent", "send"), ("met", "meet"), ("paid", "pay"), ("lost", "lose"),
        ("won", "win"), ("sold", "sell"), ("led", "lead"), ("children", "child"),
        ("men", "man"), ("women", "woman"), ("mice", "mouse"), ("feet", "foot"),
        ("teeth", "tooth"), ("geese", "goose"), ("data", "data"), ("news", "news"),
    ]
    .into_iter()
    .collect()
});

/// Plural noun rules: (suffix, replacement). Longer suffixes first.
const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("oes", "o"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Verb inflection rules: (suffix, replacement). Longer suffixes first.
const VERB_SUFFIXES: &[(&str, &str)] = &[
    // -ing endings (doubled consonants first)
    ("pping", "p"),
    ("tting", "t"),
    ("nning", "n"),
    ("mming", "m"),
    ("dding", "d"),
    ("gging", "g"),
    ("ating", "ate"),
    ("ving", "ve"),
    ("zing", "ze"),
    ("ying", "y"),
    ("eing", "e"),
    ("uing", "ue"),
    ("ing", ""),
    // -ed endings
    ("pped", "p"),
    ("tted", "t"),
    ("nned", "n"),
    ("mmed", "m"),
    ("dded", "d"),
    ("gged", "g"),
    ("ated", "ate"),
    ("ied", "y"),
    ("eed", "ee"),
    ("ued", "ue"),
    ("ved", "ve"),
    ("zed", "ze"),
    ("ed", ""),
    // -s endings
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("oes", "o"),
    ("ss", "ss"),
    ("s", ""),
];

/// Lowercased base form of `word` for the given part of speech.
pub fn lemmatize(word: &str, pos: PosTag) -> String {
    let lower = word.to_lowercase();
    if let Some(base) = IRREGULAR.get(lower.as_str()) {
        return (*base).to_string();
    }
    match pos {
        PosTag::Noun => strip_suffix(&lower, NOUN_SUFFIXES),
        PosTag::Verb => strip_suffix(&lower, VERB_SUFFIXES),
        _ => lower,
    }
}

fn strip_suffix(word: &str, rules: &[(&str, &str)]) -> String {
    if word.len() <= 3 || !word.is_ascii() {
        return word.to_string();
    }
    for &(suffix, replacement) in rules {
        if word.len() > suffix.len() && word.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            return format!("{}{}", stem, replacement);
        }
    }
    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_plurals() {
        assert_eq!(lemmatize("Products", PosTag::Noun), "product");
        assert_eq!(lemmatize("companies", PosTag::Noun), "company");
        assert_eq!(lemmatize("boxes", PosTag::Noun), "box");
        assert_eq!(lemmatize("business", PosTag::Noun), "business");
        assert_eq!(lemmatize("status", PosTag::Noun), "status");
        assert_eq!(lemmatize("children", PosTag::Noun), "child");
    }

    #[test]
    fn test_verb_forms() {
        assert_eq!(lemmatize("running", PosTag::Verb), "run");
        assert_eq!(lemmatize("studied", PosTag::Verb), "study");
        assert_eq!(lemmatize("loved", PosTag::Verb), "love");
        assert_eq!(lemmatize("hating", PosTag::Verb), "hate");
        assert_eq!(lemmatize("works", PosTag::Verb), "work");
        assert_eq!(lemmatize("was", PosTag::Verb), "be");
    }

    #[test]
    fn test_proper_nouns_and_adjectives_untouched() {
        assert_eq!(lemmatize("Paris", PosTag::ProperNoun), "paris");
        assert_eq!(lemmatize("amazing", PosTag::Adjective), "amazing");
    }
}
