//! Rule-based part-of-speech tagger.
//!
//! Closed-class words come from fixed tables; open-class words are resolved
//! through a small verb/adjective/adverb lexicon, suffix rules, capitalization
//! and one token of left context. Anything left over is a noun.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::lemma::lemmatize;
use crate::tokenize::{RawToken, TokenKind};

/// Coarse universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Particle,
    Number,
    Punct,
    Other,
}

impl PosTag {
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }
}

static CLOSED_CLASS: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let groups: [(PosTag, &[&str]); 8] = [
        (
            PosTag::Determiner,
            &[
                "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her",
                "its", "our", "their", "some", "any", "each", "every", "no", "all", "both",
                "another", "such", "which", "whose", "what", "either", "neither", "several",
            ],
        ),
        (
            PosTag::Pronoun,
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
                "yourself", "himself", "herself", "itself", "ourselves", "themselves", "mine",
                "yours", "hers", "ours", "theirs", "who", "whom", "someone", "somebody",
                "everyone", "everybody", "anyone", "nobody", "something", "nothing",
                "anything", "everything",
            ],
        ),
        (
            PosTag::Preposition,
            &[
                "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
                "into", "through", "during", "before", "after", "above", "below", "to", "from",
                "up", "down", "over", "under", "across", "along", "among", "around", "behind",
                "beside", "beyond", "near", "off", "onto", "toward", "towards", "upon",
                "within", "without", "via", "per", "since", "until", "like", "despite",
            ],
        ),
        (
            PosTag::Conjunction,
            &[
                "and", "or", "but", "nor", "so", "yet", "because", "although", "though",
                "while", "whereas", "if", "unless", "than", "whether", "as", "once",
            ],
        ),
        (
            PosTag::Auxiliary,
            &[
                "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
                "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
                "might", "must", "'re", "'ve", "'ll", "'d", "'m",
            ],
        ),
        (PosTag::Particle, &["'s", "’s", "not", "n't"]),
        (
            PosTag::Adverb,
            &[
                "very", "too", "also", "just", "only", "even", "still", "already", "always",
                "never", "often", "sometimes", "here", "there", "now", "then", "soon", "again",
                "almost", "quite", "rather", "really", "well", "much", "more", "most", "less",
                "least", "how", "when", "where", "why", "however", "therefore", "perhaps",
                "maybe", "instead", "together", "away", "back", "ever", "yesterday", "today",
                "tomorrow",
            ],
        ),
        (
            PosTag::Number,
            &[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                "eleven", "twelve", "twenty", "hundred", "thousand", "million", "billion",
            ],
        ),
    ];
    for (tag, words) in groups {
        for w in words {
            map.entry(*w).or_insert(tag);
        }
    }
    map
});

/// Base forms of common verbs. Inflected forms are matched through the lemmatizer.
static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "accept", "achieve", "add", "agree", "allow", "announce", "appear", "apply", "argue",
        "arrive", "ask", "beat", "become", "begin", "believe", "belong", "bring", "build", "buy",
        "call", "change", "choose", "claim", "close", "come", "consider", "contain",
        "continue", "create", "cut", "decide", "deliver", "describe", "design", "develop",
        "die", "discover", "discuss", "drive", "eat", "enable", "enjoy", "expect", "explain",
        "fail", "fall", "feel", "fight", "find", "finish", "follow", "forget", "get", "give",
        "go", "grow", "happen", "hate", "hear", "help", "hold", "hope", "improve", "include",
        "increase", "introduce", "join", "keep", "know", "launch", "lead", "learn", "leave",
        "let", "lie", "like", "listen", "live", "look", "lose", "love", "make", "mean",
        "meet", "move", "need", "offer", "open", "pay", "plan", "play", "prefer", "present",
        "produce", "provide", "publish", "put", "raise", "reach", "read", "receive",
        "recommend", "reduce", "release", "remain", "remember", "report", "require",
        "return", "run", "say", "see", "seem", "sell", "send", "serve", "set", "show",
        "sit", "speak", "spend", "stand", "start", "stay", "stop", "struggle", "study",
        "suggest", "support", "take", "talk", "teach", "tell", "tend", "think", "travel",
        "try", "turn", "understand", "use", "visit", "wait", "walk", "want", "watch", "win",
        "wish", "wonder", "work", "worry", "write",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "amazing", "angry", "awful", "bad", "beautiful", "best", "better", "big", "bright",
        "broken", "busy", "cheap", "clean", "clear", "close", "cold", "common", "complete",
        "complex", "cool", "dark", "dead", "deep", "different", "difficult", "dirty",
        "disappointing", "early", "easy", "entire", "excellent", "exciting", "expensive",
        "fantastic", "fast", "few", "fine", "first", "free", "fresh", "full", "funny",
        "general", "good", "great", "green", "happy", "hard", "heavy", "high", "horrible",
        "hot", "huge", "important", "interesting", "large", "last", "late", "little",
        "local", "long", "low", "main", "major", "modern", "new", "next", "nice", "old",
        "open", "other", "poor", "popular", "possible", "powerful", "pretty", "previous",
        "public", "quick", "real", "recent", "red", "rich", "right", "sad", "safe", "same",
        "serious", "short", "simple", "slow", "small", "smart", "social", "special",
        "strong", "sure", "terrible", "tired", "true", "various", "warm", "weak", "whole",
        "wide", "wonderful", "worse", "worst", "wrong", "young",
    ]
    .into_iter()
    .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ical"];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ship", "ance", "ence", "ist",
];

/// Tag tokens produced by [`crate::tokenize::tokenize`].
pub fn tag(tokens: &[RawToken]) -> Vec<PosTag> {
    let mut tags = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let prev = tags.last().copied();
        let sentence_initial = i == 0 || tokens[i - 1].sentence != token.sentence
            || (tokens[i - 1].kind == TokenKind::Punct && is_opening(&tokens[i - 1].text));
        let next_capitalized = tokens
            .get(i + 1)
            .is_some_and(|t| {
                t.sentence == token.sentence
                    && t.kind == TokenKind::Word
                    && is_capitalized(&t.text)
            });
        let tag = match token.kind {
            TokenKind::Punct => PosTag::Punct,
            TokenKind::Number => PosTag::Number,
            TokenKind::Email | TokenKind::Url => PosTag::Other,
            TokenKind::Word => tag_word(&token.text, prev, sentence_initial, next_capitalized),
        };
        tags.push(tag);
    }
    tags
}

/// Tag a bare word sequence with no case or punctuation information.
pub fn tag_words(words: &[&str]) -> Vec<PosTag> {
    let mut tags: Vec<PosTag> = Vec::with_capacity(words.len());
    for word in words {
        let prev = tags.last().copied();
        tags.push(tag_word(word, prev, true, false));
    }
    tags
}

fn tag_word(
    word: &str,
    prev: Option<PosTag>,
    sentence_initial: bool,
    next_capitalized: bool,
) -> PosTag {
    if is_acronym(word) {
        return PosTag::ProperNoun;
    }

    let lower = word.to_lowercase();
    if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
        return *tag;
    }

    if is_capitalized(word) && (!sentence_initial || next_capitalized) {
        return PosTag::ProperNoun;
    }

    let after_modifier = matches!(
        prev,
        Some(PosTag::Determiner | PosTag::Adjective | PosTag::Number)
    );

    if ADJECTIVES.contains(lower.as_str()) {
        return PosTag::Adjective;
    }

    if is_verb(&lower) {
        // "the work", "a new building", "the finished report"
        return match (after_modifier, lower.ends_with("ed")) {
            (false, _) => PosTag::Verb,
            (true, true) => PosTag::Adjective,
            (true, false) => PosTag::Noun,
        };
    }

    if lower.len() > 4 && lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if NOUN_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
        return PosTag::Noun;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
        return PosTag::Adjective;
    }
    if lower.len() > 4 && lower.ends_with("ing") {
        return if after_modifier { PosTag::Noun } else { PosTag::Verb };
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        return if after_modifier { PosTag::Adjective } else { PosTag::Verb };
    }

    PosTag::Noun
}

fn is_verb(lower: &str) -> bool {
    VERBS.contains(lower) || VERBS.contains(lemmatize(lower, PosTag::Verb).as_str())
}

pub(crate) fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// `NASA`, `IBM`, `U.S.`; a lone `I` or `A` is not an acronym.
pub(crate) fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2
        && letters.iter().all(|c| c.is_uppercase())
        && word.chars().all(|c| c.is_alphabetic() || c == '.' || c == '&')
}

fn is_opening(s: &str) -> bool {
    matches!(s, "\"" | "'" | "(" | "[" | "“" | "‘")
}
