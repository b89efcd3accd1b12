//! One test, one sample: `ks`, `chi-square`, `autocorrelation`, `gap`, `poker`.

use uniformity_tests::{
    AutocorrelationParams, ChiSquareParams, GapParams, PokerParams, TestResult,
    autocorrelation_test, chi_square_test, gap_test, ks_test, poker_test,
};

use super::{InputArgs, OutputFormat, load_sample, parse_format};
use crate::error::CliError;
use crate::present;

/// Which test to run, with its parameters.
#[derive(Debug, Clone, Copy)]
pub enum SingleTest {
    Ks,
    ChiSquare {
        params: ChiSquareParams,
        table: bool,
        histogram: bool,
    },
    Autocorrelation(AutocorrelationParams),
    Gap(GapParams),
    Poker(PokerParams),
}

impl SingleTest {
    pub fn run(&self, sample: &[f64], alpha: f64) -> Result<TestResult, CliError> {
        let result = match self {
            Self::Ks => ks_test(sample, alpha),
            Self::ChiSquare { params, .. } => chi_square_test(sample, alpha, params),
            Self::Autocorrelation(params) => autocorrelation_test(sample, alpha, params),
            Self::Gap(params) => gap_test(sample, alpha, params),
            Self::Poker(params) => poker_test(sample, alpha, params),
        };
        Ok(result?)
    }
}

pub struct TestCommandConfig<'a> {
    pub input: &'a InputArgs,
    pub alpha: f64,
    pub format: &'a str,
    pub test: SingleTest,
}

pub fn run(cfg: TestCommandConfig<'_>) -> Result<(), CliError> {
    let sample = load_sample(cfg.input)?;
    let result = cfg.test.run(&sample.values, cfg.alpha)?;

    match parse_format(cfg.format) {
        OutputFormat::Json => println!("{}", present::result_json(&result)?),
        OutputFormat::Text => {
            println!("{} ({} values, alpha={})\n", sample.label, sample.values.len(), cfg.alpha);
            present::print_result(&result);
            if let SingleTest::ChiSquare {
                params,
                table,
                histogram,
            } = cfg.test
            {
                if table {
                    println!();
                    present::print_frequency_table(&result);
                }
                if histogram {
                    println!();
                    present::print_histogram(&sample.values, params.bins);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniformity_tests::{ErrorKind, Verdict};

    fn grid(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect()
    }

    #[test]
    fn test_dispatch_names() {
        let sample = grid(1000);
        let tests = [
            (SingleTest::Ks, "Kolmogorov-Smirnov"),
            (
                SingleTest::ChiSquare {
                    params: ChiSquareParams::default(),
                    table: false,
                    histogram: false,
                },
                "Chi-Square",
            ),
            (SingleTest::Poker(PokerParams::default()), "Poker"),
        ];
        for (test, name) in tests {
            assert_eq!(test.run(&sample, 0.05).unwrap().name, name);
        }
    }

    #[test]
    fn test_grid_passes_ks() {
        let result = SingleTest::Ks.run(&grid(1000), 0.05).unwrap();
        assert_eq!(result.verdict, Verdict::Accepted);
    }

    #[test]
    fn test_errors_become_cli_errors() {
        let err = SingleTest::Gap(GapParams {
            lower: 0.8,
            upper: 0.2,
        })
        .run(&grid(100), 0.05)
        .unwrap_err();
        match err {
            CliError::Test(e) => assert_eq!(e.kind(), ErrorKind::InvalidParameter),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_alpha_is_rejected() {
        let err = SingleTest::Autocorrelation(AutocorrelationParams::default())
            .run(&grid(100), 1.5)
            .unwrap_err();
        assert!(err.to_string().contains("alpha"));
    }
}
