//! # uniformity-core
//!
//! Sample loading for the uniformity battery.
//!
//! A sample is a plain `Vec<f64>`. It comes from one of three places:
//!
//! - [`FileSource`]: a whitespace-separated text file
//! - [`ReaderSource`]: any reader, usually stdin
//! - [`GeneratedSource`]: seeded `StdRng` draws, for demos and calibration
//!
//! ```
//! use uniformity_core::{GeneratedSource, SampleSource};
//!
//! let sample = GeneratedSource::new(1000).with_seed(7).load().unwrap();
//! assert_eq!(sample.len(), 1000);
//! ```

pub mod error;
pub mod source;
pub mod text;

pub use error::SourceError;
pub use source::{FileSource, GeneratedSource, ReaderSource, SampleSource};
pub use text::{parse_sample, write_sample};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
