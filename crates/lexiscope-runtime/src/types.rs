//! Runtime types.

use lexiscope_core::AnalysisRecord;
use serde::Serialize;

/// Whether a freshly analyzed record reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PersistStatus {
    Stored,
    /// No store was configured or the insert failed.
    Skipped { reason: String },
}

impl PersistStatus {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// Result of one `analyze` call.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub record: AnalysisRecord,
    pub persist: PersistStatus,
    /// Reasons for every fallback path taken while producing `record`.
    pub degradations: Vec<String>,
}

impl AnalysisReport {
    /// Caller-facing note when the record was not persisted.
    pub fn warning(&self) -> Option<String> {
        match &self.persist {
            PersistStatus::Stored => None,
            PersistStatus::Skipped { reason } => {
                Some(format!("Analysis completed but not saved: {}", reason))
            }
        }
    }
}
