pub mod generate;
pub mod interactive;
pub mod report;
pub mod single;

use clap::Args;
use uniformity_core::{FileSource, GeneratedSource, ReaderSource, SampleSource};
use uniformity_tests::{BinRange, DigitRule};

use crate::error::CliError;

/// Where a test command gets its sample.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Sample file, whitespace-separated reals; `-` reads stdin
    #[arg(long, conflicts_with = "generate")]
    pub input: Option<String>,

    /// Draw this many pseudo-random Uniform[0,1) values instead of reading a file
    #[arg(long)]
    pub generate: Option<usize>,

    /// Seed for --generate (OS-seeded when omitted)
    #[arg(long, requires = "generate")]
    pub seed: Option<u64>,
}

/// A loaded sample and a label for its origin.
#[derive(Debug)]
pub struct Sample {
    pub label: String,
    pub values: Vec<f64>,
}

/// Load the sample selected by `args`.
pub fn load_sample(args: &InputArgs) -> Result<Sample, CliError> {
    let source: Box<dyn SampleSource> = match (&args.input, args.generate) {
        (Some(path), None) if path == "-" => Box::new(ReaderSource::stdin()),
        (Some(path), None) => Box::new(FileSource::new(path)),
        (None, Some(count)) => {
            let mut source = GeneratedSource::new(count);
            source.seed = args.seed;
            Box::new(source)
        }
        _ => {
            return Err(CliError::Usage(
                "exactly one of --input or --generate is required".to_string(),
            ));
        }
    };
    let values = source.load()?;
    log::debug!("sample {}: {} values", source.describe(), values.len());
    Ok(Sample {
        label: source.describe(),
        values,
    })
}

/// Output format for single-test commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse an output format string into the enum.
pub fn parse_format(s: &str) -> OutputFormat {
    match s {
        "json" => OutputFormat::Json,
        "text" => OutputFormat::Text,
        _ => {
            log::warn!("unknown output format '{s}', using text");
            OutputFormat::Text
        }
    }
}

/// Parse a chi-square bin range string into the enum.
pub fn parse_range(s: &str) -> BinRange {
    match s {
        "unit" | "unit_interval" => BinRange::UnitInterval,
        "observed" | "sample" => BinRange::Observed,
        _ => {
            log::warn!("unknown bin range '{s}', using unit");
            BinRange::UnitInterval
        }
    }
}

pub fn digit_rule(strict: bool) -> DigitRule {
    if strict {
        DigitRule::Strict
    } else {
        DigitRule::FixedPoint
    }
}
