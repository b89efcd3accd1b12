//! Accept/reject decisions.
//!
//! Four tests compare a p-value with the significance level. Autocorrelation
//! compares `|Z0|` with a two-sided normal critical value and never produces a
//! p-value. Both rules live side by side in [`DecisionRule`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, TestError};
use crate::oracle;

/// Significance level `alpha`, guaranteed to lie in the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(TestError::invalid(
                "alpha",
                format!("significance level must lie in (0, 1), got {alpha}"),
            ))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = TestError;

    fn try_from(alpha: f64) -> Result<Self> {
        Self::new(alpha)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(alpha: SignificanceLevel) -> f64 {
        alpha.0
    }
}

impl std::fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome for the null hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "Accepted"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Accept iff `p_value > alpha`.
pub fn decide(p_value: f64, alpha: SignificanceLevel) -> Verdict {
    if p_value > alpha.value() {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    }
}

/// How a test turns its statistic into a verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionRule {
    /// Accept iff the p-value exceeds alpha.
    PValue { p_value: f64 },
    /// Accept iff `|statistic|` is below the two-sided normal critical value at alpha.
    CriticalValue { statistic: f64 },
}

impl DecisionRule {
    pub fn decide(&self, alpha: SignificanceLevel) -> Verdict {
        match *self {
            Self::PValue { p_value } => decide(p_value, alpha),
            Self::CriticalValue { statistic } => {
                if statistic.abs() < oracle::two_sided_critical(alpha) {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected
                }
            }
        }
    }
}
