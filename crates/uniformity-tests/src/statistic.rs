//! Raw test statistics.
//!
//! Functions here compute statistics for any finite input and check only the
//! structural preconditions of the statistic itself (sample length, lag,
//! bounds). Support checks such as "every value lies in [0, 1)" belong to the
//! test procedures in [`crate::suite`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TestError};
use crate::oracle;
use crate::result::TestKind;

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Centred sum of squares at or below this fraction of `Σ x²` counts as zero
/// variance. Relative, so rescaling a sample never changes the outcome.
const RELATIVE_VARIANCE_FLOOR: f64 = f64::EPSILON;

/// Arithmetic mean. Callers guarantee a non-empty slice.
fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

// ═══════════════════════════════════════════════════════════════════════════════
// Kolmogorov-Smirnov
// ═══════════════════════════════════════════════════════════════════════════════

/// Two-sided KS distance to the Uniform(0,1) CDF and its asymptotic p-value.
///
/// Returns `(D, p)`. The p-value applies Stephens' effective-n correction
/// `λ = (√n + 0.12 + 0.11/√n) · D` before the Kolmogorov survival function.
pub fn ks_statistic(sample: &[f64]) -> Result<(f64, f64)> {
    let n = sample.len();
    if n == 0 {
        return Err(TestError::insufficient(
            TestKind::KolmogorovSmirnov.name(),
            1,
            0,
        ));
    }
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    // D = max(D+, D-) over both edges of each ECDF step
    let nf = n as f64;
    let mut d_max = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f_x = x.clamp(0.0, 1.0);
        let d_plus = (i + 1) as f64 / nf - f_x;
        let d_minus = f_x - i as f64 / nf;
        d_max = d_max.max(d_plus).max(d_minus);
    }

    let sqrt_n = nf.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d_max;
    Ok((d_max, oracle::kolmogorov_survival(lambda)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Chi-Square
// ═══════════════════════════════════════════════════════════════════════════════

/// Interval partitioned into equal-width bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinRange {
    /// `[0, 1)`, the support of the null distribution.
    #[default]
    UnitInterval,
    /// `[min, max]` of the sample, last bin closed. A constant sample `v`
    /// uses `[v - 0.5, v + 0.5]`.
    Observed,
}

/// Frequency table and statistic of a chi-square goodness-of-fit run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareTally {
    pub statistic: f64,
    pub observed: Vec<u64>,
    pub expected: f64,
    pub edges: Vec<f64>,
}

impl ChiSquareTally {
    pub fn degrees_of_freedom(&self) -> u64 {
        self.observed.len() as u64 - 1
    }
}

/// Bin the sample into `bins` equal-width bins and compute
/// `Σ (observed - expected)² / expected` with `expected = n / bins`.
pub fn chi_square_statistic(
    sample: &[f64],
    bins: usize,
    range: BinRange,
) -> Result<ChiSquareTally> {
    if bins < 2 {
        return Err(TestError::invalid(
            "bins",
            format!("need at least 2 bins, got {bins}"),
        ));
    }
    let n = sample.len();
    if n < bins {
        return Err(TestError::insufficient(TestKind::ChiSquare.name(), bins, n));
    }

    let (lo, hi) = match range {
        BinRange::UnitInterval => (0.0, 1.0),
        BinRange::Observed => {
            let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
            let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if min == max {
                (min - 0.5, max + 0.5)
            } else {
                (min, max)
            }
        }
    };
    let width = (hi - lo) / bins as f64;

    let mut observed = vec![0u64; bins];
    for &x in sample {
        let pos = ((x - lo) / width).floor();
        let idx = if pos <= 0.0 {
            0
        } else {
            (pos as usize).min(bins - 1)
        };
        observed[idx] += 1;
    }

    let expected = n as f64 / bins as f64;
    let statistic: f64 = observed
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let edges = (0..=bins)
        .map(|i| lo + (hi - lo) * i as f64 / bins as f64)
        .collect();

    Ok(ChiSquareTally {
        statistic,
        observed,
        expected,
        edges,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Autocorrelation
// ═══════════════════════════════════════════════════════════════════════════════

/// Lag-`k` sample autocorrelation and its test statistic.
///
/// Returns `(rho, Z0)` where
/// `rho = Σ_{i<n-k} (x_i - m)(x_{i+k} - m) / Σ_i (x_i - m)²` and
/// `Z0 = rho · sqrt(n / (1 - rho²))`.
pub fn autocorrelation_statistic(sample: &[f64], lag: usize) -> Result<(f64, f64)> {
    let name = TestKind::Autocorrelation.name();
    let n = sample.len();
    if lag < 1 {
        return Err(TestError::invalid("lag", "must be at least 1"));
    }
    if lag >= n {
        return Err(TestError::invalid(
            "lag",
            format!("must be less than the sample length {n}, got {lag}"),
        ));
    }

    let m = mean(sample);
    let denominator: f64 = sample.iter().map(|x| (x - m) * (x - m)).sum();
    let sum_sq: f64 = sample.iter().map(|x| x * x).sum();
    if denominator <= RELATIVE_VARIANCE_FLOOR * sum_sq {
        return Err(TestError::degenerate(name, "zero variance"));
    }
    let numerator: f64 = sample
        .iter()
        .zip(&sample[lag..])
        .map(|(a, b)| (a - m) * (b - m))
        .sum();

    let rho = numerator / denominator;
    if rho.abs() >= 1.0 {
        return Err(TestError::degenerate(
            name,
            format!("|rho| = {:.6} >= 1, Z0 undefined", rho.abs()),
        ));
    }
    let z0 = rho * (n as f64 / (1.0 - rho * rho)).sqrt();
    Ok((rho, z0))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Gap
// ═══════════════════════════════════════════════════════════════════════════════

/// Gap lengths and statistic of a gap-test run.
#[derive(Debug, Clone, PartialEq)]
pub struct GapTally {
    /// Out-of-range run length between consecutive in-range hits, in order.
    pub lengths: Vec<u64>,
    pub mean_gap: f64,
    pub statistic: f64,
}

impl GapTally {
    /// Number of recorded gaps (k).
    pub fn count(&self) -> usize {
        self.lengths.len()
    }

    pub fn degrees_of_freedom(&self) -> u64 {
        self.lengths.len() as u64 - 1
    }
}

/// Scan left to right, recording one gap per in-range hit after the first.
///
/// Values before the first hit are not counted. The statistic is
/// `(k - mean_gap)² / mean_gap` with `k - 1` degrees of freedom, so at least
/// two gaps with a non-zero mean are required.
pub fn gap_statistic(sample: &[f64], lower: f64, upper: f64) -> Result<GapTally> {
    let name = TestKind::Gap.name();
    if !lower.is_finite() || !upper.is_finite() {
        return Err(TestError::invalid(
            "bounds",
            format!("bounds must be finite, got [{lower}, {upper}]"),
        ));
    }
    if lower > upper {
        return Err(TestError::invalid(
            "bounds",
            format!("lower bound {lower} exceeds upper bound {upper}"),
        ));
    }

    let mut lengths = Vec::new();
    let mut gap = 0u64;
    let mut in_range = false;
    for &x in sample {
        if (lower..=upper).contains(&x) {
            if in_range {
                lengths.push(gap);
                gap = 0;
            }
            in_range = true;
        } else if in_range {
            gap += 1;
        }
    }

    let k = lengths.len();
    if k < 2 {
        return Err(TestError::degenerate(
            name,
            format!("need at least 2 gaps between values in [{lower}, {upper}], found {k}"),
        ));
    }
    let mean_gap = lengths.iter().sum::<u64>() as f64 / k as f64;
    if mean_gap <= 0.0 {
        return Err(TestError::degenerate(
            name,
            "mean gap length is zero, every in-range value follows another",
        ));
    }
    let statistic = (k as f64 - mean_gap).powi(2) / mean_gap;

    Ok(GapTally {
        lengths,
        mean_gap,
        statistic,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Poker
// ═══════════════════════════════════════════════════════════════════════════════

/// Digits per poker hand.
pub const POKER_DIGITS: usize = 5;

/// Multisets of 5 digits drawn from 0-9: C(14, 5).
pub const POKER_SIGNATURES: usize = 2002;

/// Sorted-digit signature of a hand.
pub type Signature = [u8; POKER_DIGITS];

/// Number of most frequent signatures kept in a [`PokerTally`].
const POKER_TOP: usize = 5;

/// Absorbs binary representation error when scaling by 10⁵.
const DIGIT_NUDGE: f64 = 1e-7;

/// How a value in [0, 1) is turned into five decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitRule {
    /// `floor(x · 10⁵)`, zero-padded to five digits. `0.5` → `50000`.
    #[default]
    FixedPoint,
    /// The first five fractional digits of the shortest round-trip decimal
    /// form. Values with fewer than five fractional digits are rejected.
    Strict,
}

/// Five digits of `value` under `rule`, in reading order.
///
/// Returns `None` when `rule` is [`DigitRule::Strict`] and the value has fewer
/// than five fractional digits.
pub fn poker_hand(value: f64, rule: DigitRule) -> Option<[u8; POKER_DIGITS]> {
    let mut hand = [0u8; POKER_DIGITS];
    match rule {
        DigitRule::FixedPoint => {
            let mut scaled = (value * 100_000.0 + DIGIT_NUDGE)
                .floor()
                .clamp(0.0, 99_999.0) as u32;
            for digit in hand.iter_mut().rev() {
                *digit = (scaled % 10) as u8;
                scaled /= 10;
            }
        }
        DigitRule::Strict => {
            let repr = format!("{value}");
            let fraction = repr.split_once('.').map(|(_, f)| f)?;
            if fraction.len() < POKER_DIGITS {
                return None;
            }
            for (digit, c) in hand.iter_mut().zip(fraction.bytes()) {
                *digit = c.checked_sub(b'0').filter(|d| *d <= 9)?;
            }
        }
    }
    Some(hand)
}

/// Signature counts and statistic of a poker-test run.
#[derive(Debug, Clone, PartialEq)]
pub struct PokerTally {
    pub statistic: f64,
    pub expected: f64,
    pub occupied: usize,
    pub top: Vec<(Signature, u64)>,
}

/// Chi-square over all 2002 sorted-digit signatures with `expected = n / 2002`.
pub fn poker_statistic(sample: &[f64], rule: DigitRule) -> Result<PokerTally> {
    let name = TestKind::Poker.name();
    let n = sample.len();
    if n == 0 {
        return Err(TestError::insufficient(name, 1, 0));
    }

    let mut counts: BTreeMap<Signature, u64> = BTreeMap::new();
    for (index, &x) in sample.iter().enumerate() {
        let mut hand = poker_hand(x, rule).ok_or_else(|| {
            TestError::degenerate(
                name,
                format!("value #{index} ({x}) has fewer than {POKER_DIGITS} decimal digits"),
            )
        })?;
        hand.sort_unstable();
        *counts.entry(hand).or_insert(0) += 1;
    }

    let expected = n as f64 / POKER_SIGNATURES as f64;
    let observed_part: f64 = counts
        .values()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // every unobserved signature contributes (0 - e)² / e = e
    let unobserved = (POKER_SIGNATURES - counts.len()) as f64;
    let statistic = observed_part + unobserved * expected;

    let mut top: Vec<(Signature, u64)> = counts.iter().map(|(s, &c)| (*s, c)).collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    top.truncate(POKER_TOP);

    Ok(PokerTally {
        statistic,
        expected,
        occupied: counts.len(),
        top,
    })
}
