//! Uniform(0,1) hypothesis test battery.
//!
//! Five tests decide whether a sequence of reals behaves like independent
//! draws from Uniform(0,1):
//!
//! - [`ks_test`]: Kolmogorov-Smirnov distance to the uniform CDF
//! - [`chi_square_test`]: goodness of fit over equal-width bins
//! - [`autocorrelation_test`]: lag-k autocorrelation, critical-value decision
//! - [`gap_test`]: gap lengths between values in a sub-range
//! - [`poker_test`]: sorted-digit signatures of five-digit hands
//!
//! Each test is a pure function of `(sample, alpha, parameters)` and returns a
//! [`TestResult`] or a [`TestError`]:
//!
//! ```
//! let sample: Vec<f64> = (0..1000).map(|i| (i as f64 + 0.5) / 1000.0).collect();
//! let result = uniformity_tests::ks_test(&sample, 0.05).unwrap();
//! assert!(result.passed());
//! ```
//!
//! [`run_battery`] runs all five with one [`BatteryConfig`].

pub mod battery;
pub mod decision;
pub mod error;
pub mod oracle;
pub mod result;
pub mod statistic;
pub mod suite;

pub use battery::{BatteryConfig, BatteryEntry, acceptance_rate, run_battery, run_test};
pub use decision::{DecisionRule, SignificanceLevel, Verdict, decide};
pub use error::{ErrorKind, TestError};
pub use result::{Breakdown, TestKind, TestResult};
pub use statistic::{BinRange, DigitRule, POKER_SIGNATURES};
pub use suite::{
    AutocorrelationParams, ChiSquareParams, GapParams, PokerParams, autocorrelation_test,
    chi_square_test, gap_test, ks_test, poker_test,
};
