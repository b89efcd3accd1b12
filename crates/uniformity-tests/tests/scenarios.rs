//! End-to-end scenarios through the public API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uniformity_tests::{
    AutocorrelationParams, Breakdown, ChiSquareParams, ErrorKind, GapParams, PokerParams,
    Verdict, autocorrelation_test, chi_square_test, gap_test, ks_test, poker_test,
};

fn uniform(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

/// Fraction of `trials` uniform samples rejected by `test`.
fn rejection_rate(trials: usize, n: usize, test: impl Fn(&[f64]) -> Verdict) -> f64 {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let rejected = (0..trials)
        .filter(|_| test(&uniform(&mut rng, n)) == Verdict::Rejected)
        .count();
    rejected as f64 / trials as f64
}

#[test]
fn ks_rejects_uniform_samples_at_about_alpha() {
    let rate = rejection_rate(400, 1000, |s| ks_test(s, 0.05).unwrap().verdict);
    assert!((0.01..=0.10).contains(&rate), "KS rejection rate {rate}");
}

#[test]
fn chi_square_rejects_uniform_samples_at_about_alpha() {
    let params = ChiSquareParams::default();
    let rate = rejection_rate(400, 1000, |s| {
        chi_square_test(s, 0.05, &params).unwrap().verdict
    });
    assert!((0.01..=0.10).contains(&rate), "chi-square rejection rate {rate}");
}

#[test]
fn gap_pattern_of_three() {
    let mut sample = Vec::new();
    for i in 0..20 {
        sample.push(0.1);
        if i < 19 {
            sample.extend_from_slice(&[0.55, 0.75, 0.95]);
        }
    }
    let result = gap_test(&sample, 0.05, &GapParams::default()).unwrap();
    let Breakdown::Gap { gaps, mean_gap, .. } = result.breakdown else {
        panic!("expected gap breakdown");
    };
    assert_eq!(gaps, 19);
    assert_eq!(mean_gap, 3.0);
}

#[test]
fn alternating_sequence_is_autocorrelated() {
    let sample: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 0.1 } else { 0.9 }).collect();
    let result = autocorrelation_test(&sample, 0.05, &AutocorrelationParams::default()).unwrap();
    assert_eq!(result.verdict, Verdict::Rejected);
    let Breakdown::Autocorrelation { rho, z0, .. } = result.breakdown else {
        panic!("expected autocorrelation breakdown");
    };
    assert!(rho < -0.98, "rho={rho}");
    assert!(z0.abs() > 50.0, "z0={z0}");
}

#[test]
fn identical_hands_fail_poker() {
    let sample = vec![0.11111; 400];
    let result = poker_test(&sample, 0.05, &PokerParams::default()).unwrap();
    assert_eq!(result.verdict, Verdict::Rejected);
    assert!(result.p_value.unwrap() < 1e-10);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    let sample = uniform(&mut rng, 2000);
    let a = chi_square_test(&sample, 0.05, &ChiSquareParams::default()).unwrap();
    let b = chi_square_test(&sample, 0.05, &ChiSquareParams::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.statistic.to_bits(), b.statistic.to_bits());
}

#[test]
fn failures_are_classified() {
    let sample = [0.1, 0.2, 0.3];
    assert_eq!(
        ks_test(&sample, 0.0).unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
    assert_eq!(
        ks_test(&[0.1, f64::NAN], 0.05).unwrap_err().kind(),
        ErrorKind::MalformedSample
    );
    assert_eq!(
        autocorrelation_test(&sample, 0.05, &AutocorrelationParams { lag: 3 })
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidParameter
    );
    let inverted = GapParams {
        lower: 0.9,
        upper: 0.1,
    };
    assert_eq!(
        gap_test(&sample, 0.05, &inverted).unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
}

#[test]
fn sample_is_not_mutated() {
    let sample = vec![0.9, 0.1, 0.5, 0.3, 0.7, 0.2, 0.8, 0.4, 0.6, 0.05];
    let copy = sample.clone();
    ks_test(&sample, 0.05).unwrap();
    chi_square_test(&sample, 0.05, &ChiSquareParams { bins: 5, ..Default::default() }).unwrap();
    assert_eq!(sample, copy);
}
