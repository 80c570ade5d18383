//! Tri-state result for best-effort components.
//!
//! Analyzers never fail a request outright: when a capability is missing or
//! misbehaves they fall back to a cheaper computation. `Outcome` keeps that
//! fallback visible to callers instead of collapsing it into a plain value.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    /// The primary path produced the value.
    Success(T),
    /// A fallback path produced the value.
    Degraded { value: T, reason: String },
    /// No value could be produced.
    Failed { reason: String },
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Reason attached to a degraded or failed outcome.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Degraded { reason, .. } | Self::Failed { reason } => Some(reason),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(v) | Self::Degraded { value: v, .. } => Some(v),
            Self::Failed { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(v) | Self::Degraded { value: v, .. } => Some(v),
            Self::Failed { .. } => None,
        }
    }

    /// Take the value, substituting `fallback()` for a failed outcome.
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        self.into_value().unwrap_or_else(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_keeps_value_and_reason() {
        let o = Outcome::degraded(3, "no model");
        assert!(o.is_degraded());
        assert_eq!(o.value(), Some(&3));
        assert_eq!(o.reason(), Some("no model"));
    }

    #[test]
    fn test_failed_falls_back() {
        let o: Outcome<Vec<i32>> = Outcome::failed("boom");
        assert_eq!(o.reason(), Some("boom"));
        assert_eq!(o.unwrap_or_else(Vec::new), Vec::<i32>::new());
    }
}
