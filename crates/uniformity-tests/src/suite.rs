//! The five public test procedures.
//!
//! Each procedure validates alpha and its parameters, checks the sample,
//! computes the statistic, and applies its decision rule. Nothing is retained
//! between calls.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::decision::{DecisionRule, SignificanceLevel};
use crate::error::{Result, TestError};
use crate::oracle;
use crate::result::{Breakdown, TestKind, TestResult};
use crate::statistic::{self, BinRange, DigitRule, POKER_SIGNATURES};

// ═══════════════════════════════════════════════════════════════════════════════
// Parameters
// ═══════════════════════════════════════════════════════════════════════════════

/// Chi-Square binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChiSquareParams {
    pub bins: usize,
    pub range: BinRange,
}

impl Default for ChiSquareParams {
    fn default() -> Self {
        Self {
            bins: 10,
            range: BinRange::UnitInterval,
        }
    }
}

/// Autocorrelation lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocorrelationParams {
    pub lag: usize,
}

impl Default for AutocorrelationParams {
    fn default() -> Self {
        Self { lag: 1 }
    }
}

/// Inclusive range `[lower, upper]` whose hits delimit gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapParams {
    pub lower: f64,
    pub upper: f64,
}

impl Default for GapParams {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PokerParams {
    pub digits: DigitRule,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sample checks
// ═══════════════════════════════════════════════════════════════════════════════

fn check_finite(sample: &[f64]) -> Result<()> {
    match sample.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(TestError::MalformedSample {
            index,
            value: sample[index],
            reason: "is not finite",
        }),
        None => Ok(()),
    }
}

fn check_unit_interval(sample: &[f64]) -> Result<()> {
    check_finite(sample)?;
    match sample.iter().position(|x| !(0.0..1.0).contains(x)) {
        Some(index) => Err(TestError::MalformedSample {
            index,
            value: sample[index],
            reason: "lies outside [0, 1)",
        }),
        None => Ok(()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

/// Kolmogorov-Smirnov test against Uniform(0,1).
pub fn ks_test(sample: &[f64], alpha: f64) -> Result<TestResult> {
    let kind = TestKind::KolmogorovSmirnov;
    let alpha = SignificanceLevel::new(alpha)?;
    check_unit_interval(sample)?;

    let n = sample.len();
    let (d, p) = statistic::ks_statistic(sample)?;
    let verdict = DecisionRule::PValue { p_value: p }.decide(alpha);
    debug!("{kind}: n={n} D={d:.6} p={p:.6} -> {verdict}");

    Ok(TestResult {
        name: kind.name().to_string(),
        verdict,
        statistic: d,
        p_value: Some(p),
        details: format!("D={d:.6}, n={n}"),
        breakdown: Breakdown::Ks { n, d },
    })
}

/// Chi-Square goodness-of-fit test over equal-width bins.
pub fn chi_square_test(
    sample: &[f64],
    alpha: f64,
    params: &ChiSquareParams,
) -> Result<TestResult> {
    let kind = TestKind::ChiSquare;
    let alpha = SignificanceLevel::new(alpha)?;
    if params.bins < 2 {
        return Err(TestError::invalid(
            "bins",
            format!("need at least 2 bins, got {}", params.bins),
        ));
    }
    match params.range {
        BinRange::UnitInterval => check_unit_interval(sample)?,
        BinRange::Observed => check_finite(sample)?,
    }

    let tally = statistic::chi_square_statistic(sample, params.bins, params.range)?;
    let df = tally.degrees_of_freedom();
    let p = oracle::chi_square_survival(tally.statistic, df)?;
    let verdict = DecisionRule::PValue { p_value: p }.decide(alpha);
    debug!(
        "{kind}: bins={} chi2={:.4} df={df} p={p:.6} -> {verdict}",
        params.bins, tally.statistic
    );

    Ok(TestResult {
        name: kind.name().to_string(),
        verdict,
        statistic: tally.statistic,
        p_value: Some(p),
        details: format!(
            "bins={}, expected_per_bin={:.1}, df={df}",
            params.bins, tally.expected
        ),
        breakdown: Breakdown::ChiSquare {
            observed: tally.observed,
            expected: tally.expected,
            edges: tally.edges,
            degrees_of_freedom: df,
        },
    })
}

/// Lag-k autocorrelation test, decided by two-sided critical value.
pub fn autocorrelation_test(
    sample: &[f64],
    alpha: f64,
    params: &AutocorrelationParams,
) -> Result<TestResult> {
    let kind = TestKind::Autocorrelation;
    let alpha = SignificanceLevel::new(alpha)?;
    check_finite(sample)?;

    let lag = params.lag;
    let (rho, z0) = statistic::autocorrelation_statistic(sample, lag)?;
    let z_critical = oracle::two_sided_critical(alpha);
    let verdict = DecisionRule::CriticalValue { statistic: z0 }.decide(alpha);
    debug!("{kind}: lag={lag} rho={rho:.6} Z0={z0:.4} Z_alpha={z_critical:.4} -> {verdict}");

    Ok(TestResult {
        name: kind.name().to_string(),
        verdict,
        statistic: z0,
        p_value: None,
        details: format!(
            "lag={lag}, rho={rho:.6}, |Z0|={:.4} vs Z_alpha={z_critical:.4}",
            z0.abs()
        ),
        breakdown: Breakdown::Autocorrelation {
            lag,
            rho,
            z0,
            z_critical,
        },
    })
}

/// Gap test over the inclusive range `[lower, upper]`.
pub fn gap_test(sample: &[f64], alpha: f64, params: &GapParams) -> Result<TestResult> {
    let kind = TestKind::Gap;
    let alpha = SignificanceLevel::new(alpha)?;
    check_finite(sample)?;

    let tally = statistic::gap_statistic(sample, params.lower, params.upper)?;
    let k = tally.count();
    let df = tally.degrees_of_freedom();
    let p = oracle::chi_square_survival(tally.statistic, df)?;
    let verdict = DecisionRule::PValue { p_value: p }.decide(alpha);
    debug!(
        "{kind}: k={k} mean_gap={:.4} stat={:.4} p={p:.6} -> {verdict}",
        tally.mean_gap, tally.statistic
    );

    Ok(TestResult {
        name: kind.name().to_string(),
        verdict,
        statistic: tally.statistic,
        p_value: Some(p),
        details: format!(
            "range=[{}, {}], gaps={k}, mean_gap={:.4}",
            params.lower, params.upper, tally.mean_gap
        ),
        breakdown: Breakdown::Gap {
            gaps: k,
            mean_gap: tally.mean_gap,
            degrees_of_freedom: df,
        },
    })
}

/// Poker test on the first five decimal digits of each value.
pub fn poker_test(sample: &[f64], alpha: f64, params: &PokerParams) -> Result<TestResult> {
    let kind = TestKind::Poker;
    let alpha = SignificanceLevel::new(alpha)?;
    check_unit_interval(sample)?;

    let tally = statistic::poker_statistic(sample, params.digits)?;
    let df = POKER_SIGNATURES as u64 - 1;
    let p = oracle::chi_square_survival(tally.statistic, df)?;
    let verdict = DecisionRule::PValue { p_value: p }.decide(alpha);
    debug!(
        "{kind}: occupied={}/{POKER_SIGNATURES} chi2={:.2} p={p:.6} -> {verdict}",
        tally.occupied, tally.statistic
    );

    Ok(TestResult {
        name: kind.name().to_string(),
        verdict,
        statistic: tally.statistic,
        p_value: Some(p),
        details: format!(
            "signatures observed={}/{POKER_SIGNATURES}, expected_per_signature={:.4}",
            tally.occupied, tally.expected
        ),
        breakdown: Breakdown::Poker {
            categories: POKER_SIGNATURES,
            occupied: tally.occupied,
            expected: tally.expected,
            degrees_of_freedom: df,
            top: tally.top,
        },
    })
}
