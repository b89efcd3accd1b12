//! Test identities and result values.

use serde::{Deserialize, Serialize};

use crate::decision::Verdict;

/// The five tests of the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    KolmogorovSmirnov,
    ChiSquare,
    Autocorrelation,
    Gap,
    Poker,
}

impl TestKind {
    /// Battery order.
    pub const ALL: [TestKind; 5] = [
        Self::Autocorrelation,
        Self::Gap,
        Self::Poker,
        Self::KolmogorovSmirnov,
        Self::ChiSquare,
    ];

    /// Human-readable test name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::KolmogorovSmirnov => "Kolmogorov-Smirnov",
            Self::ChiSquare => "Chi-Square",
            Self::Autocorrelation => "Autocorrelation",
            Self::Gap => "Gap",
            Self::Poker => "Poker",
        }
    }

    /// Whether the test decides by p-value (all but autocorrelation).
    pub const fn uses_p_value(self) -> bool {
        !matches!(self, Self::Autocorrelation)
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single test invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub verdict: Verdict,
    /// Primary statistic: D, chi-square, Z0, gap statistic or poker statistic.
    pub statistic: f64,
    /// `None` for autocorrelation, which decides by critical value.
    pub p_value: Option<f64>,
    pub details: String,
    pub breakdown: Breakdown,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Per-test secondary outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum Breakdown {
    Ks {
        n: usize,
        d: f64,
    },
    ChiSquare {
        /// Observed count per bin.
        observed: Vec<u64>,
        /// Expected count, identical for every bin.
        expected: f64,
        /// `bins + 1` bin edges.
        edges: Vec<f64>,
        degrees_of_freedom: u64,
    },
    Autocorrelation {
        lag: usize,
        rho: f64,
        z0: f64,
        z_critical: f64,
    },
    Gap {
        /// Number of recorded gaps (k).
        gaps: usize,
        mean_gap: f64,
        degrees_of_freedom: u64,
    },
    Poker {
        categories: usize,
        /// Signatures observed at least once.
        occupied: usize,
        expected: f64,
        degrees_of_freedom: u64,
        /// Most frequent signatures, highest count first.
        top: Vec<([u8; 5], u64)>,
    },
}
