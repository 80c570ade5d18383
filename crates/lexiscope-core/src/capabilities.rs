//! Capability availability reporting for the health endpoint.

use serde::{Deserialize, Serialize};

/// Connectivity state of one external capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn from_flag(up: bool) -> Self {
        if up {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn is_up(self) -> bool {
        self == Self::Connected
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Which capabilities were wired in at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityReport {
    pub database: Connectivity,
    pub llm: Connectivity,
    pub nlp: Connectivity,
    /// Model name of the completion backend, when one is configured.
    pub llm_model: Option<String>,
    /// Name of the NLP pipeline, when one is configured.
    pub nlp_pipeline: Option<String>,
}

impl CapabilityReport {
    /// True when every capability is live (no fallback path will be taken).
    pub fn fully_available(&self) -> bool {
        self.database.is_up() && self.llm.is_up() && self.nlp.is_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_availability() {
        let report = CapabilityReport {
            database: Connectivity::Connected,
            llm: Connectivity::from_flag(false),
            nlp: Connectivity::Connected,
            llm_model: None,
            nlp_pipeline: Some("heuristic".into()),
        };
        assert!(!report.fully_available());
        assert_eq!(report.llm.to_string(), "disconnected");

        let all_up = CapabilityReport {
            llm: Connectivity::Connected,
            llm_model: Some("gpt-3.5-turbo".into()),
            ..report
        };
        assert!(all_up.fully_available());
    }
}
