//! Full battery: all five tests with one shared configuration.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::decision::SignificanceLevel;
use crate::error::TestError;
use crate::result::{TestKind, TestResult};
use crate::suite::{self, AutocorrelationParams, ChiSquareParams, GapParams, PokerParams};

/// Alpha plus per-test parameters. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub alpha: SignificanceLevel,
    pub chi_square: ChiSquareParams,
    pub autocorrelation: AutocorrelationParams,
    pub gap: GapParams,
    pub poker: PokerParams,
}

/// Outcome of one test within a battery run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryEntry {
    pub kind: TestKind,
    pub outcome: Result<TestResult, TestError>,
}

impl BatteryEntry {
    pub fn accepted(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.passed())
    }
}

/// Run one test of the battery with the parameters from `config`.
pub fn run_test(
    kind: TestKind,
    sample: &[f64],
    config: &BatteryConfig,
) -> Result<TestResult, TestError> {
    let alpha = config.alpha.value();
    match kind {
        TestKind::KolmogorovSmirnov => suite::ks_test(sample, alpha),
        TestKind::ChiSquare => suite::chi_square_test(sample, alpha, &config.chi_square),
        TestKind::Autocorrelation => {
            suite::autocorrelation_test(sample, alpha, &config.autocorrelation)
        }
        TestKind::Gap => suite::gap_test(sample, alpha, &config.gap),
        TestKind::Poker => suite::poker_test(sample, alpha, &config.poker),
    }
}

/// Run every test. A failing test is recorded and does not stop the others.
pub fn run_battery(sample: &[f64], config: &BatteryConfig) -> Vec<BatteryEntry> {
    let entries: Vec<BatteryEntry> = TestKind::ALL
        .iter()
        .map(|&kind| {
            let outcome = run_test(kind, sample, config);
            if let Err(e) = &outcome {
                debug!("{kind} did not run: {e}");
            }
            BatteryEntry { kind, outcome }
        })
        .collect();
    info!(
        "battery on {} values at alpha={}: {}/{} accepted",
        sample.len(),
        config.alpha,
        entries.iter().filter(|e| e.accepted()).count(),
        entries.len()
    );
    entries
}

/// Fraction of entries that ran and were accepted.
///
/// Returns 0.0 for an empty slice.
pub fn acceptance_rate(entries: &[BatteryEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().filter(|e| e.accepted()).count() as f64 / entries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinRange, ErrorKind, Verdict};

    #[test]
    fn test_default_config() {
        let config = BatteryConfig::default();
        assert_eq!(config.alpha.value(), 0.05);
        assert_eq!(config.chi_square.bins, 10);
        assert_eq!(config.autocorrelation.lag, 1);
        assert_eq!(config.gap.lower, 0.0);
        assert_eq!(config.gap.upper, 0.5);
    }

    #[test]
    fn test_config_json_partial() {
        let json = r#"{"alpha": 0.01, "chi_square": {"bins": 16, "range": "observed"}}"#;
        let config: BatteryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.alpha.value(), 0.01);
        assert_eq!(config.chi_square.bins, 16);
        assert_eq!(config.chi_square.range, BinRange::Observed);
        assert_eq!(config.autocorrelation, AutocorrelationParams::default());
    }

    #[test]
    fn test_config_json_rejects_bad_alpha() {
        assert!(serde_json::from_str::<BatteryConfig>(r#"{"alpha": 0.0}"#).is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = BatteryConfig {
            alpha: SignificanceLevel::new(0.1).unwrap(),
            gap: GapParams {
                lower: 0.2,
                upper: 0.4,
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BatteryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_battery_runs_every_test_in_order() {
        let data: Vec<f64> = (0..500).map(|i| ((i * 7919) % 500) as f64 / 500.0).collect();
        let entries = run_battery(&data, &BatteryConfig::default());
        let kinds: Vec<_> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, TestKind::ALL.to_vec());
    }

    #[test]
    fn test_battery_continues_past_failures() {
        // constant sample: autocorrelation and gap fail, the rest still run
        let data = vec![0.7; 200];
        let entries = run_battery(&data, &BatteryConfig::default());
        assert_eq!(entries.len(), 5);

        let failed: Vec<_> = entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.kind, err.kind())))
            .collect();
        assert!(failed.contains(&(TestKind::Autocorrelation, ErrorKind::DegenerateInput)));
        assert!(failed.contains(&(TestKind::Gap, ErrorKind::DegenerateInput)));

        let ks = entries
            .iter()
            .find(|e| e.kind == TestKind::KolmogorovSmirnov)
            .unwrap();
        assert_eq!(ks.outcome.as_ref().unwrap().verdict, Verdict::Rejected);
    }

    #[test]
    fn test_acceptance_rate() {
        assert_eq!(acceptance_rate(&[]), 0.0);
        let data = vec![0.7; 200];
        let entries = run_battery(&data, &BatteryConfig::default());
        assert_eq!(acceptance_rate(&entries), 0.0);
    }
}
