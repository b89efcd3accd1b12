//! Error types for the test battery.
//!
//! Every failure is local to one test invocation and names the precondition
//! that failed, so a presenter can print a precise diagnostic.

use serde::Serialize;

/// Coarse classification of a [`TestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A caller-supplied parameter is outside its domain.
    InvalidParameter,
    /// The test is not well-defined for this sample/parameter combination.
    DegenerateInput,
    /// The sample holds a value the test cannot accept.
    MalformedSample,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::DegenerateInput => write!(f, "degenerate input"),
            Self::MalformedSample => write!(f, "malformed sample"),
        }
    }
}

/// Failure of a single test invocation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestError {
    /// Parameter rejected before any computation.
    #[error("`{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Statistic undefined for this input (zero variance, too few gaps, ...).
    #[error("{test}: {reason}")]
    DegenerateInput { test: &'static str, reason: String },

    /// Non-finite value, or a value outside the support the test assumes.
    #[error("sample value #{index} ({value}) {reason}")]
    MalformedSample {
        index: usize,
        value: f64,
        reason: &'static str,
    },
}

impl TestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::DegenerateInput { .. } => ErrorKind::DegenerateInput,
            Self::MalformedSample { .. } => ErrorKind::MalformedSample,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(test: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            test,
            reason: reason.into(),
        }
    }

    /// Shorthand for a sample that is too short for `test`.
    pub(crate) fn insufficient(test: &'static str, needed: usize, got: usize) -> Self {
        Self::degenerate(test, format!("insufficient data: need {needed}, got {got}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            TestError::invalid("alpha", "must be in (0, 1)").kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            TestError::insufficient("Gap", 2, 0).kind(),
            ErrorKind::DegenerateInput
        );
        let malformed = TestError::MalformedSample {
            index: 3,
            value: f64::NAN,
            reason: "is not finite",
        };
        assert_eq!(malformed.kind(), ErrorKind::MalformedSample);
    }

    #[test]
    fn test_display_carries_context() {
        let err = TestError::invalid("lag", "must be less than the sample length 10, got 12");
        let msg = err.to_string();
        assert!(msg.contains("lag"));
        assert!(msg.contains("12"));

        let err = TestError::insufficient("Chi-Square", 10, 4);
        assert_eq!(err.to_string(), "Chi-Square: insufficient data: need 10, got 4");
    }
}
