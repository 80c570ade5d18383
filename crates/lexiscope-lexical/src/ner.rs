//! Named-entity recognition from regex patterns, capitalization runs and
//! small gazetteers.
//!
//! Numeric entities (dates, times, money, percentages, quantities) are found
//! with regexes over the raw text first. Runs of capitalized tokens that do
//! not overlap those spans are then classified by title prefix, organization
//! and location suffixes, and gazetteer lookups.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::tagger::{is_acronym, is_capitalized, PosTag};
use crate::tokenize::{RawToken, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Norp,
    Date,
    Time,
    Money,
    Percent,
    Quantity,
    Misc,
}

impl EntityLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Norp => "NORP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
            Self::Percent => "PERCENT",
            Self::Quantity => "QUANTITY",
            Self::Misc => "MISC",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled span of the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    /// Byte offsets into the annotated text.
    pub start: usize,
    pub end: usize,
}

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static PATTERNS: Lazy<Vec<(EntityLabel, Regex)>> = Lazy::new(|| {
    let specs: Vec<(EntityLabel, String)> = vec![
        (EntityLabel::Money, r"\$\d[\d,]*(?:\.\d+)?(?:\s*(?:million|billion|trillion|[MBK]))?\b|\b\d[\d,]*(?:\.\d+)?\s*(?:dollars|euros|pounds|USD|EUR|GBP)\b".into()),
        (EntityLabel::Percent, r"\b\d+(?:,\d{3})*(?:\.\d+)?\s*(?:%|percent\b)".into()),
        (EntityLabel::Time, r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm)?\b|\b\d{1,2}\s*(?:am|pm)\b".into()),
        (EntityLabel::Date, format!(r"\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s*\d{{4}})?\b")),
        (EntityLabel::Date, format!(r"\b(?:{MONTHS})(?:\s+\d{{4}})?\b")),
        (EntityLabel::Date, r"\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b".into()),
        (EntityLabel::Date, r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)s?\b".into()),
        (EntityLabel::Date, r"(?i)\b(?:last|next|this|previous)\s+(?:week|month|year|quarter)\b|\b(?:yesterday|today|tomorrow)\b".into()),
        (EntityLabel::Date, r"\b(?:19|20)\d{2}s?\b".into()),
        (EntityLabel::Quantity, r"\b\d+(?:,\d{3})*(?:\.\d+)?\s*(?:km|kg|mg|lbs?|miles?|meters?|feet|inches|tons?|GB|MB|KB|TB|hours?|minutes?|seconds?|days?|weeks?|months?|years?)\b".into()),
    ];
    specs
        .into_iter()
        .map(|(label, pattern)| (label, Regex::new(&pattern).expect("valid regex")))
        .collect()
});

static TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Mr", "Mrs", "Ms", "Dr", "Prof", "Sir", "President",
        "CEO", "Senator",
    ]
    .into_iter()
    .collect()
});

static ORG_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Inc", "Inc.", "Corp", "Corp.", "Corporation", "LLC", "Ltd", "Ltd.", "Co.", "Company",
        "Group", "University", "Institute", "Foundation", "Association", "Bank", "Agency",
        "Department", "Ministry", "Council", "Committee", "Party", "Labs", "Technologies",
        "Systems", "Airlines", "Motors", "Society", "College", "School", "Hospital",
    ]
    .into_iter()
    .collect()
});

static KNOWN_ORGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Google", "Apple", "Microsoft", "Amazon", "Facebook", "Meta", "Tesla", "Netflix",
        "Twitter", "OpenAI", "Anthropic", "Intel", "Nvidia", "Samsung", "Sony", "Toyota",
        "Walmart", "Spotify", "Uber", "Airbnb", "Reuters", "Congress", "Parliament",
    ]
    .into_iter()
    .collect()
});

static GPE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // countries
        "America", "United States", "USA", "U.S.", "US", "UK", "U.K.", "United Kingdom",
        "England", "Scotland", "Ireland", "France", "Germany", "Spain", "Italy", "Portugal",
        "Netherlands", "Belgium", "Sweden", "Norway", "Denmark", "Finland", "Poland",
        "Russia", "Ukraine", "China", "Japan", "Korea", "India", "Pakistan", "Brazil",
        "Mexico", "Canada", "Australia", "Argentina", "Egypt", "Nigeria", "Kenya",
        "Israel", "Iran", "Turkey", "Greece", "Switzerland", "Austria",
        // cities
        "London", "Paris", "Berlin", "Madrid", "Rome", "Tokyo", "Beijing", "Shanghai",
        "Moscow", "Sydney", "Toronto", "Chicago", "Boston", "Seattle", "Austin", "Dallas",
        "Houston", "Denver", "Atlanta", "Miami", "New York", "Los Angeles",
        "San Francisco", "Washington", "Dublin", "Amsterdam", "Vienna", "Mumbai", "Delhi",
        "Singapore", "Dubai",
        // states
        "California", "Texas", "Florida", "Oregon", "Ohio", "Georgia", "Virginia",
    ]
    .into_iter()
    .collect()
});

static LOCATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Europe", "Asia", "Africa", "Antarctica", "North America", "South America",
        "Middle East", "Pacific", "Atlantic", "Arctic", "Mediterranean", "Sahara",
        "Himalayas", "Alps", "Amazon River",
    ]
    .into_iter()
    .collect()
});

const LOC_SUFFIXES: &[&str] = &[
    "River", "Mountain", "Mountains", "Lake", "Ocean", "Sea", "Valley", "Desert", "Island",
    "Islands", "Park", "Bay", "Forest", "Coast", "Canyon",
];

static NORP: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "American", "Americans", "British", "English", "French", "German", "Germans",
        "Spanish", "Italian", "Chinese", "Japanese", "Korean", "Indian", "Russian",
        "Canadian", "Mexican", "Brazilian", "Australian", "European", "Europeans", "African",
        "Asian", "Christian", "Muslim", "Jewish", "Buddhist", "Hindu", "Democrat",
        "Democrats", "Republican", "Republicans",
    ]
    .into_iter()
    .collect()
});

const CONNECTORS: &[&str] = &["of", "&", "de", "von", "van"];

/// Find entities in `text` given its tokens and their tags.
pub fn recognize(text: &str, tokens: &[RawToken], tags: &[PosTag]) -> Vec<EntitySpan> {
    let mut spans = pattern_spans(text);
    spans.extend(capitalized_spans(text, tokens, tags, &spans));
    spans.sort_by_key(|s| (s.start, std::cmp::Reverse(s.end)));
    spans
}

fn pattern_spans(text: &str) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = Vec::new();
    for (label, re) in PATTERNS.iter() {
        for m in re.find_iter(text) {
            let overlaps = spans.iter().any(|s| m.start() < s.end && s.start < m.end());
            if !overlaps {
                spans.push(EntitySpan {
                    text: m.as_str().trim().to_string(),
                    label: *label,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
    }
    spans
}

fn capitalized_spans(
    text: &str,
    tokens: &[RawToken],
    tags: &[PosTag],
    claimed: &[EntitySpan],
) -> Vec<EntitySpan> {
    let is_claimed = |t: &RawToken| claimed.iter().any(|s| t.start < s.end && s.start < t.end);
    let is_candidate = |i: usize| {
        let t = &tokens[i];
        t.kind == TokenKind::Word
            && is_capitalized(&t.text)
            && !is_claimed(t)
            && (tags[i] == PosTag::ProperNoun
                || in_gazetteer(&t.text)
                || TITLES.contains(t.text.as_str()))
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if !is_candidate(i) {
            i += 1;
            continue;
        }

        let mut titled = false;
        while i < tokens.len() && TITLES.contains(tokens[i].text.as_str()) {
            titled = true;
            i += 1;
        }

        let start = i;
        let Some(sentence) = tokens.get(start).map(|t| t.sentence) else {
            break;
        };
        let mut end = start;
        while end < tokens.len()
            && tokens[end].sentence == sentence
            && (end == start || run_continues(text, &tokens[end - 1], &tokens[end]))
        {
            if is_candidate(end) {
                end += 1;
            } else if end > start
                && CONNECTORS.contains(&tokens[end].text.as_str())
                && end + 1 < tokens.len()
                && is_candidate(end + 1)
                && run_continues(text, &tokens[end], &tokens[end + 1])
            {
                end += 2;
            } else {
                break;
            }
        }

        if end > start {
            let span_text = &text[tokens[start].start..tokens[end - 1].end];
            let words: Vec<&str> = tokens[start..end].iter().map(|t| t.text.as_str()).collect();
            if let Some(label) = classify(span_text, &words, titled) {
                spans.push(EntitySpan {
                    text: span_text.to_string(),
                    label,
                    start: tokens[start].start,
                    end: tokens[end - 1].end,
                });
            }
            i = end;
        } else {
            i = start + 1;
        }
    }
    spans
}

/// Names span plain spaces only; tabs and line breaks end a run.
fn run_continues(text: &str, prev: &RawToken, next: &RawToken) -> bool {
    text[prev.end..next.start]
        .chars()
        .all(|c| c == ' ' || c == '\u{a0}')
}

fn in_gazetteer(word: &str) -> bool {
    GPE.contains(word)
        || KNOWN_ORGS.contains(word)
        || NORP.contains(word)
        || LOCATIONS.contains(word)
}

fn classify(span_text: &str, words: &[&str], titled: bool) -> Option<EntityLabel> {
    let last = *words.last()?;
    if titled {
        return Some(EntityLabel::Person);
    }
    let org_head = words.len() > 2 && ORG_SUFFIXES.contains(words[0]) && words[1] == "of";
    if ORG_SUFFIXES.contains(last) || org_head || KNOWN_ORGS.contains(span_text) {
        return Some(EntityLabel::Org);
    }
    if GPE.contains(span_text) {
        return Some(EntityLabel::Gpe);
    }
    if LOCATIONS.contains(span_text) || (words.len() > 1 && LOC_SUFFIXES.contains(&last)) {
        return Some(EntityLabel::Loc);
    }
    if NORP.contains(span_text) {
        return Some(EntityLabel::Norp);
    }
    if words.len() == 1 && is_acronym(last) {
        return Some(EntityLabel::Org);
    }
    let titlecase = words.iter().all(|w| {
        let mut chars = w.chars();
        chars.next().is_some_and(char::is_uppercase) && chars.all(char::is_lowercase)
    });
    if (2..=3).contains(&words.len()) && titlecase {
        return Some(EntityLabel::Person);
    }
    Some(EntityLabel::Misc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::tag;
    use crate::tokenize::tokenize;

    fn entities(text: &str) -> Vec<(String, EntityLabel)> {
        let tokens = tokenize(text);
        let tags = tag(&tokens);
        recognize(text, &tokens, &tags)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    fn has(found: &[(String, EntityLabel)], text: &str, label: EntityLabel) -> bool {
        found.iter().any(|(t, l)| t == text && *l == label)
    }

    #[test]
    fn test_people_orgs_places() {
        let found = entities("Yesterday Maria Lopez met engineers from Google in Paris.");
        assert!(has(&found, "Maria Lopez", EntityLabel::Person), "{found:?}");
        assert!(has(&found, "Google", EntityLabel::Org), "{found:?}");
        assert!(has(&found, "Paris", EntityLabel::Gpe), "{found:?}");
    }

    #[test]
    fn test_title_and_org_suffix() {
        let found =
            entities("The report from Dr. Chen praised Acme Corp. and the Bank of England.");
        assert!(has(&found, "Chen", EntityLabel::Person), "{found:?}");
        assert!(has(&found, "Acme Corp.", EntityLabel::Org), "{found:?}");
        assert!(has(&found, "Bank of England", EntityLabel::Org), "{found:?}");
    }

    #[test]
    fn test_numeric_entities() {
        let found = entities("On March 3, 2024 shares rose 12% to $40 million at 9:30 am.");
        assert!(has(&found, "March 3, 2024", EntityLabel::Date), "{found:?}");
        assert!(has(&found, "12%", EntityLabel::Percent), "{found:?}");
        assert!(has(&found, "$40 million", EntityLabel::Money), "{found:?}");
        assert!(has(&found, "9:30 am", EntityLabel::Time), "{found:?}");
    }

    #[test]
    fn test_grouped_digits() {
        let found = entities("Costs rose 12,345.67% while the cable ran 1,500 km.");
        assert!(has(&found, "12,345.67%", EntityLabel::Percent), "{found:?}");
        assert!(has(&found, "1,500 km", EntityLabel::Quantity), "{found:?}");
        assert!(!found.iter().any(|(t, _)| t == "345.67%"), "{found:?}");
    }

    #[test]
    fn test_names_do_not_cross_line_breaks() {
        let found = entities("Meeting notes\nMaria Lopez\nParis office\tTokyo");
        assert!(has(&found, "Maria Lopez", EntityLabel::Person), "{found:?}");
        assert!(has(&found, "Paris", EntityLabel::Gpe), "{found:?}");
        assert!(has(&found, "Tokyo", EntityLabel::Gpe), "{found:?}");
        assert!(found.iter().all(|(t, _)| !t.contains(['\n', '\t'])), "{found:?}");
    }

    #[test]
    fn test_sentence_initial_common_word_is_not_entity() {
        let found = entities("Products arrived late. Shipping was slow.");
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn test_order_follows_text() {
        let found = entities("Berlin hosted Tesla engineers before Tokyo did.");
        let names: Vec<&str> = found.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, vec!["Berlin", "Tesla", "Tokyo"]);
    }
}
