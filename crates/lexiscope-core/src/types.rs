//! Analysis record and search query types shared across crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Categorical sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Sort rank used by the `sentiment` search order.
    pub fn priority(self) -> u8 {
        match self {
            Self::Positive => 0,
            Self::Neutral => 1,
            Self::Negative => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Lenient parse: unknown labels become `Neutral`.
    pub fn normalize(label: &str) -> Self {
        label.parse().unwrap_or(Self::Neutral)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(Error::Validation(format!("Unknown sentiment: {}", other))),
        }
    }
}

/// Named entities grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityGroups {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Entities of any other label, formatted `"<text> (<LABEL>)"`.
    #[serde(default, alias = "entities")]
    pub other: Vec<String>,
}

impl EntityGroups {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.organizations.is_empty()
            && self.locations.is_empty()
            && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.people.len() + self.organizations.len() + self.locations.len() + self.other.len()
    }
}

/// The merged, persisted result of one text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub text: String,
    pub summary: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<EntityGroups>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_count: Option<usize>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Fresh identifier for a new record.
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Result ordering for searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Sentiment,
}

impl std::str::FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "sentiment" => Ok(Self::Sentiment),
            other => Err(Error::Validation(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Filter and sort specification for stored analyses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub topic: Option<String>,
    pub keyword: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub sort_by: SortBy,
}

impl SearchQuery {
    /// Build a query from raw request parameters.
    ///
    /// Blank strings count as absent; a sentiment of `all` means no filter.
    /// At least one of topic or keyword must be present.
    pub fn from_params(
        topic: Option<&str>,
        keyword: Option<&str>,
        sentiment: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self> {
        let topic = non_blank(topic);
        let keyword = non_blank(keyword);
        if topic.is_none() && keyword.is_none() {
            return Err(Error::Validation(
                "Either topic or keyword parameter is required".into(),
            ));
        }

        let sentiment = match non_blank(sentiment) {
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse()?),
            None => None,
        };

        let sort_by = match sort_by {
            Some(s) => s.parse()?,
            None => SortBy::default(),
        };

        Ok(Self {
            topic,
            keyword,
            sentiment,
            sort_by,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse_and_priority() {
        assert_eq!(" Positive ".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert!("mixed".parse::<Sentiment>().is_err());
        assert_eq!(Sentiment::normalize("mixed"), Sentiment::Neutral);
        assert!(Sentiment::Positive.priority() < Sentiment::Neutral.priority());
        assert!(Sentiment::Neutral.priority() < Sentiment::Negative.priority());
    }

    #[test]
    fn test_entity_groups_alias() {
        let groups: EntityGroups = serde_json::from_value(serde_json::json!({
            "people": ["Ada Lovelace"],
            "entities": ["1843 (DATE)"],
        }))
        .unwrap();
        assert_eq!(groups.other, vec!["1843 (DATE)".to_string()]);
        assert!(groups.organizations.is_empty());
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_record_wire_shape() {
        let record = AnalysisRecord {
            id: "abc".into(),
            text: "t".into(),
            summary: "s".into(),
            title: None,
            topics: vec!["health".into()],
            sentiment: Sentiment::Negative,
            keywords: vec![],
            confidence_score: 0.5,
            entities: None,
            phrases: None,
            readability_score: Some(12.5),
            word_count: None,
            sentence_count: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sentiment"], "negative");
        assert!(json["confidence_score"].is_number());
        assert!(json.get("entities").is_none());
        assert_eq!(json["readability_score"], 12.5);
    }

    #[test]
    fn test_search_query_requires_topic_or_keyword() {
        let err = SearchQuery::from_params(None, Some("  "), None, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let q =
            SearchQuery::from_params(Some("health"), None, Some("all"), Some("oldest")).unwrap();
        assert_eq!(q.topic.as_deref(), Some("health"));
        assert_eq!(q.sentiment, None);
        assert_eq!(q.sort_by, SortBy::Oldest);

        let q = SearchQuery::from_params(None, Some("rust"), Some("negative"), None).unwrap();
        assert_eq!(q.sentiment, Some(Sentiment::Negative));
        assert_eq!(q.sort_by, SortBy::Newest);
    }
}
