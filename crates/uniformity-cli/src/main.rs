//! CLI for uniformity: is this sequence plausibly Uniform(0,1)?

mod commands;
mod error;
mod present;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use uniformity_tests::{AutocorrelationParams, ChiSquareParams, GapParams, PokerParams};

use commands::InputArgs;
use commands::single::{SingleTest, TestCommandConfig};

#[derive(Parser)]
#[command(name = "uniformity")]
#[command(about = "uniformity — hypothesis tests for Uniform(0,1) samples")]
#[command(version = uniformity_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Kolmogorov-Smirnov test: largest distance between the empirical and uniform CDFs
    Ks {
        #[command(flatten)]
        input: InputArgs,

        /// Significance level in (0, 1)
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Chi-square goodness of fit over equal-width bins
    ChiSquare {
        #[command(flatten)]
        input: InputArgs,

        /// Significance level in (0, 1)
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Number of bins (at least 2, at most the sample size)
        #[arg(long, default_value = "10")]
        bins: usize,

        /// Binned interval: unit ([0, 1), default) or observed ([min, max] of the sample)
        #[arg(long, default_value = "unit", value_parser = ["unit", "observed"])]
        range: String,

        /// Print the observed/expected frequency table
        #[arg(long)]
        table: bool,

        /// Print a text histogram of the sample
        #[arg(long)]
        histogram: bool,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Lag-k autocorrelation, decided against the two-sided normal critical value
    Autocorrelation {
        #[command(flatten)]
        input: InputArgs,

        /// Significance level in (0, 1)
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Lag k, 1 <= k < sample size
        #[arg(long, default_value = "1")]
        lag: usize,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Gap test: run lengths between values falling in [lower, upper]
    Gap {
        #[command(flatten)]
        input: InputArgs,

        /// Significance level in (0, 1)
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Lower bound of the marked sub-range
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        lower: f64,

        /// Upper bound of the marked sub-range
        #[arg(long, default_value = "0.5", allow_negative_numbers = true)]
        upper: f64,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Poker test over sorted five-digit hands
    Poker {
        #[command(flatten)]
        input: InputArgs,

        /// Significance level in (0, 1)
        #[arg(long, default_value = "0.05")]
        alpha: f64,

        /// Reject values whose shortest decimal form has fewer than five fractional digits
        #[arg(long)]
        strict_digits: bool,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Run all five tests and summarise; optionally write Markdown and JSON reports
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Battery configuration JSON (missing fields use defaults)
        #[arg(long)]
        config: Option<String>,

        /// Significance level, overrides the configuration file
        #[arg(long)]
        alpha: Option<f64>,

        /// Output path for the Markdown report
        #[arg(long)]
        output: Option<String>,

        /// Output path for the JSON report
        #[arg(long)]
        json: Option<String>,
    },

    /// Write pseudo-random Uniform[0,1) values, one per line
    Generate {
        /// Number of values
        #[arg(long, default_value = "1000")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Menu-driven session over a sample file
    Interactive {
        /// Sample file (prompted for when omitted)
        #[arg(long)]
        input: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ks {
            input,
            alpha,
            format,
        } => commands::single::run(TestCommandConfig {
            input: &input,
            alpha,
            format: &format,
            test: SingleTest::Ks,
        }),
        Commands::ChiSquare {
            input,
            alpha,
            bins,
            range,
            table,
            histogram,
            format,
        } => commands::single::run(TestCommandConfig {
            input: &input,
            alpha,
            format: &format,
            test: SingleTest::ChiSquare {
                params: ChiSquareParams {
                    bins,
                    range: commands::parse_range(&range),
                },
                table,
                histogram,
            },
        }),
        Commands::Autocorrelation {
            input,
            alpha,
            lag,
            format,
        } => commands::single::run(TestCommandConfig {
            input: &input,
            alpha,
            format: &format,
            test: SingleTest::Autocorrelation(AutocorrelationParams { lag }),
        }),
        Commands::Gap {
            input,
            alpha,
            lower,
            upper,
            format,
        } => commands::single::run(TestCommandConfig {
            input: &input,
            alpha,
            format: &format,
            test: SingleTest::Gap(GapParams { lower, upper }),
        }),
        Commands::Poker {
            input,
            alpha,
            strict_digits,
            format,
        } => commands::single::run(TestCommandConfig {
            input: &input,
            alpha,
            format: &format,
            test: SingleTest::Poker(PokerParams {
                digits: commands::digit_rule(strict_digits),
            }),
        }),
        Commands::Report {
            input,
            config,
            alpha,
            output,
            json,
        } => commands::report::run(commands::report::ReportCommandConfig {
            input: &input,
            config_path: config.as_deref(),
            alpha,
            output_path: output.as_deref(),
            json_path: json.as_deref(),
        }),
        Commands::Generate {
            count,
            seed,
            output,
        } => commands::generate::run(count, seed, output.as_deref()),
        Commands::Interactive { input } => commands::interactive::run(input.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
