//! Client-side filtering and ordering of stored analyses.

use std::cmp::Reverse;

use lexiscope_core::{AnalysisRecord, SearchQuery, SortBy};

/// Filter `records` by `query` and sort them.
///
/// Topic and keyword are case-insensitive substring matches against any
/// element of the record's topics or keywords; when both are given a record
/// must match both.
pub fn apply_query(records: Vec<AnalysisRecord>, query: &SearchQuery) -> Vec<AnalysisRecord> {
    let topic = query.topic.as_deref().map(str::to_lowercase);
    let keyword = query.keyword.as_deref().map(str::to_lowercase);

    let mut matches: Vec<AnalysisRecord> = records
        .into_iter()
        .filter(|r| topic.as_deref().map_or(true, |t| any_contains(&r.topics, t)))
        .filter(|r| keyword.as_deref().map_or(true, |k| any_contains(&r.keywords, k)))
        .filter(|r| query.sentiment.map_or(true, |s| r.sentiment == s))
        .collect();

    match query.sort_by {
        SortBy::Newest => matches.sort_by_key(|r| Reverse(r.created_at)),
        SortBy::Oldest => matches.sort_by_key(|r| r.created_at),
        SortBy::Sentiment => {
            matches.sort_by_key(|r| (r.sentiment.priority(), Reverse(r.created_at)))
        }
    }
    matches
}

fn any_contains(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use lexiscope_core::Sentiment;

    fn record(
        id: &str,
        topics: &[&str],
        keywords: &[&str],
        sentiment: Sentiment,
        minutes: i64,
    ) -> AnalysisRecord {
        AnalysisRecord {
            id: id.into(),
            text: String::new(),
            summary: "s".into(),
            title: None,
            topics: topics.iter().map(|s| s.to_string()).collect(),
            sentiment,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            confidence_score: 0.8,
            entities: None,
            phrases: None,
            readability_score: None,
            word_count: None,
            sentence_count: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    fn corpus() -> Vec<AnalysisRecord> {
        vec![
            record("a", &["Health", "diet"], &["vegetable"], Sentiment::Positive, 0),
            record("b", &["finance"], &["market", "health insurance"], Sentiment::Negative, 10),
            record("c", &["public health"], &["hospital"], Sentiment::Neutral, 20),
            record("d", &["sports"], &["football"], Sentiment::Positive, 30),
        ]
    }

    fn ids(records: &[AnalysisRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn query(topic: Option<&str>, keyword: Option<&str>) -> SearchQuery {
        SearchQuery {
            topic: topic.map(String::from),
            keyword: keyword.map(String::from),
            ..SearchQuery::default()
        }
    }

    #[test]
    fn test_topic_match_is_case_insensitive_substring() {
        let found = apply_query(corpus(), &query(Some("health"), None));
        assert_eq!(ids(&found), vec!["c", "a"]);
    }

    #[test]
    fn test_keyword_match() {
        let found = apply_query(corpus(), &query(None, Some("HEALTH")));
        assert_eq!(ids(&found), vec!["b"]);
    }

    #[test]
    fn test_topic_and_keyword_intersect() {
        let found = apply_query(corpus(), &query(Some("health"), Some("hospital")));
        assert_eq!(ids(&found), vec!["c"]);
        assert!(apply_query(corpus(), &query(Some("sports"), Some("vegetable"))).is_empty());
    }

    #[test]
    fn test_sentiment_filter() {
        let mut q = query(Some("health"), None);
        q.sentiment = Some(Sentiment::Positive);
        assert_eq!(ids(&apply_query(corpus(), &q)), vec!["a"]);
    }

    #[test]
    fn test_sort_orders() {
        let mut q = query(Some("e"), None);
        q.sort_by = SortBy::Oldest;
        assert_eq!(ids(&apply_query(corpus(), &q)), vec!["a", "b", "c"]);

        q.sort_by = SortBy::Sentiment;
        assert_eq!(ids(&apply_query(corpus(), &q)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_sentiment_sort_newest_within_group() {
        let mut q = query(None, Some("a"));
        q.sort_by = SortBy::Sentiment;
        // a, d positive; c neutral; b negative
        let found = apply_query(corpus(), &q);
        assert_eq!(ids(&found), vec!["d", "a", "c", "b"]);
    }
}
