//! Reference distributions: standard normal, chi-squared and the Kolmogorov
//! limiting distribution.
//!
//! Every function here is a pure lookup. The normal and chi-squared
//! distributions come from `statrs`; the Kolmogorov series is summed locally
//! because `statrs` does not ship it.

use std::f64::consts::PI;

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::decision::SignificanceLevel;
use crate::error::{Result, TestError};

/// Upper bound on series terms for the Kolmogorov distribution.
const KOLMOGOROV_TERMS: u32 = 100;

/// Below this λ the alternating series converges too slowly; the theta-function
/// form is used instead.
const KOLMOGOROV_SWITCH: f64 = 1.18;

/// Inverse of the standard normal CDF: the `z` with `Φ(z) = p`.
pub fn inverse_normal_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(TestError::invalid(
            "p",
            format!("probability must lie in (0, 1), got {p}"),
        ));
    }
    Ok(Normal::standard().inverse_cdf(p))
}

/// Two-sided normal critical value `Z_alpha = Φ⁻¹(1 - alpha / 2)`.
pub fn two_sided_critical(alpha: SignificanceLevel) -> f64 {
    // alpha in (0, 1) keeps the probability in (0.5, 1)
    inverse_normal_cdf(1.0 - alpha.value() / 2.0).unwrap_or(f64::INFINITY)
}

/// Survival function `P(X > x)` of a chi-squared variable.
pub fn chi_square_survival(x: f64, degrees_of_freedom: u64) -> Result<f64> {
    if degrees_of_freedom == 0 {
        return Err(TestError::invalid(
            "degrees_of_freedom",
            "must be at least 1",
        ));
    }
    if !x.is_finite() || x < 0.0 {
        return Err(TestError::invalid(
            "statistic",
            format!("chi-square statistic must be finite and non-negative, got {x}"),
        ));
    }
    let dist = ChiSquared::new(degrees_of_freedom as f64)
        .map_err(|e| TestError::invalid("degrees_of_freedom", e.to_string()))?;
    Ok(dist.sf(x))
}

/// Survival function of the Kolmogorov distribution, `P(K > λ)`.
///
/// For large λ this is `2 Σ (-1)^(k-1) exp(-2k²λ²)`; for small λ the CDF is
/// summed as `sqrt(2π)/λ Σ exp(-(2k-1)²π²/(8λ²))` instead.
pub fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda.is_nan() || lambda <= 0.0 {
        return 1.0;
    }

    if lambda < KOLMOGOROV_SWITCH {
        let factor = -PI * PI / (8.0 * lambda * lambda);
        let mut cdf = 0.0;
        for k in 1..=KOLMOGOROV_TERMS {
            let j = (2 * k - 1) as f64;
            let term = (factor * j * j).exp();
            cdf += term;
            if term <= f64::EPSILON * cdf {
                break;
            }
        }
        cdf *= (2.0 * PI).sqrt() / lambda;
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    let mut p = 0.0;
    for k in 1..=KOLMOGOROV_TERMS {
        let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
        let term = (-2.0 * (k as f64 * lambda).powi(2)).exp();
        p += sign * term;
        if term <= f64::EPSILON * p.abs() {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(a: f64) -> SignificanceLevel {
        SignificanceLevel::new(a).unwrap()
    }

    #[test]
    fn test_inverse_normal_known_quantiles() {
        assert!(inverse_normal_cdf(0.5).unwrap().abs() < 1e-9);
        assert!((inverse_normal_cdf(0.975).unwrap() - 1.959964).abs() < 1e-5);
        assert!((inverse_normal_cdf(0.025).unwrap() + 1.959964).abs() < 1e-5);
    }

    #[test]
    fn test_inverse_normal_rejects_bounds() {
        assert!(inverse_normal_cdf(0.0).is_err());
        assert!(inverse_normal_cdf(1.0).is_err());
        assert!(inverse_normal_cdf(f64::NAN).is_err());
    }

    #[test]
    fn test_two_sided_critical_matches_quantile() {
        let z = two_sided_critical(alpha(0.05));
        assert!((z - 1.959964).abs() < 1e-5, "z={z}");
        let q = inverse_normal_cdf(1.0 - 0.01 / 2.0).unwrap();
        assert!((two_sided_critical(alpha(0.01)) - q).abs() < 1e-6);
    }

    #[test]
    fn test_two_sided_critical_is_the_upper_quantile() {
        for a in [0.001, 0.05, 0.5, 0.999] {
            let q = inverse_normal_cdf(1.0 - a / 2.0).unwrap();
            assert_eq!(two_sided_critical(alpha(a)).to_bits(), q.to_bits());
            assert!(q > 0.0);
        }
    }

    #[test]
    fn test_chi_square_survival_reference_values() {
        // chi2(9) 95th percentile is 16.919
        let p = chi_square_survival(16.919, 9).unwrap();
        assert!((p - 0.05).abs() < 1e-3, "p={p}");
        assert_eq!(chi_square_survival(0.0, 3).unwrap(), 1.0);
    }

    #[test]
    fn test_chi_square_survival_domain() {
        assert!(chi_square_survival(1.0, 0).is_err());
        assert!(chi_square_survival(-1.0, 4).is_err());
        assert!(chi_square_survival(f64::INFINITY, 4).is_err());
    }

    #[test]
    fn test_kolmogorov_survival_reference_values() {
        // Q_KS(1.36) ~ 0.05, Q_KS(1.63) ~ 0.01
        assert!((kolmogorov_survival(1.3581) - 0.05).abs() < 1e-3);
        assert!((kolmogorov_survival(1.6276) - 0.01).abs() < 1e-3);
        assert_eq!(kolmogorov_survival(0.0), 1.0);
        assert!(kolmogorov_survival(0.05) > 0.999_999);
        assert!(kolmogorov_survival(5.0) < 1e-15);
    }

    #[test]
    fn test_kolmogorov_survival_continuous_at_switch() {
        let below = kolmogorov_survival(KOLMOGOROV_SWITCH - 1e-9);
        let above = kolmogorov_survival(KOLMOGOROV_SWITCH);
        assert!((below - above).abs() < 1e-6, "{below} vs {above}");
    }

    #[test]
    fn test_kolmogorov_survival_monotone() {
        let mut prev = 1.0;
        for i in 1..300 {
            let p = kolmogorov_survival(i as f64 * 0.01);
            assert!(p <= prev + 1e-12, "not monotone at λ={}", i as f64 * 0.01);
            prev = p;
        }
    }
}
