//! Property tests for the battery: permutation invariance, bounds,
//! decision monotonicity and determinism.

use proptest::prelude::*;
use uniformity_tests::statistic::{chi_square_statistic, ks_statistic};
use uniformity_tests::{
    BatteryConfig, BinRange, DecisionRule, SignificanceLevel, Verdict, decide, run_battery,
};

fn unit_sample(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1.0, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn chi_square_is_permutation_invariant(
        (original, shuffled) in unit_sample(20..300)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        bins in 2usize..20,
    ) {
        prop_assume!(original.len() >= bins);
        let a = chi_square_statistic(&original, bins, BinRange::UnitInterval).unwrap();
        let b = chi_square_statistic(&shuffled, bins, BinRange::UnitInterval).unwrap();
        prop_assert_eq!(&a.observed, &b.observed);
        prop_assert_eq!(a.statistic.to_bits(), b.statistic.to_bits());
    }

    #[test]
    fn ks_distance_is_bounded(sample in unit_sample(1..500)) {
        let (d, p) = ks_statistic(&sample).unwrap();
        prop_assert!((0.0..=1.0).contains(&d), "d={}", d);
        prop_assert!((0.0..=1.0).contains(&p), "p={}", p);
        // D is never below half a step of the empirical CDF
        prop_assert!(d >= 0.5 / sample.len() as f64 - 1e-12);
    }

    #[test]
    fn raising_alpha_never_turns_rejection_into_acceptance(
        p in 0.0f64..=1.0,
        a in 0.001f64..0.999,
        b in 0.001f64..0.999,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = SignificanceLevel::new(lo).unwrap();
        let hi = SignificanceLevel::new(hi).unwrap();
        if decide(p, hi) == Verdict::Accepted {
            prop_assert_eq!(decide(p, lo), Verdict::Accepted);
        }
    }

    #[test]
    fn critical_value_rule_is_monotone_in_alpha(
        z in -10.0f64..10.0,
        a in 0.001f64..0.999,
        b in 0.001f64..0.999,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rule = DecisionRule::CriticalValue { statistic: z };
        if rule.decide(SignificanceLevel::new(hi).unwrap()) == Verdict::Accepted {
            prop_assert_eq!(
                rule.decide(SignificanceLevel::new(lo).unwrap()),
                Verdict::Accepted
            );
        }
    }

    #[test]
    fn battery_is_deterministic(sample in unit_sample(10..400)) {
        let config = BatteryConfig::default();
        let first = run_battery(&sample, &config);
        let second = run_battery(&sample, &config);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.kind, b.kind);
            match (&a.outcome, &b.outcome) {
                (Ok(x), Ok(y)) => {
                    prop_assert_eq!(x, y);
                    prop_assert_eq!(x.statistic.to_bits(), y.statistic.to_bits());
                    prop_assert_eq!(x.p_value.map(f64::to_bits), y.p_value.map(f64::to_bits));
                }
                (Err(x), Err(y)) => prop_assert_eq!(x, y),
                _ => prop_assert!(false, "outcomes differ for {}", a.kind),
            }
        }
    }
}
