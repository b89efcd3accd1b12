//! Numbered menu over a loaded sample.
//!
//! Reads choices and parameters line by line. End of input at any prompt
//! ends the session cleanly. A test that refuses its input prints the error
//! and returns to the menu.

use std::io::{BufRead, Write};
use std::str::FromStr;

use uniformity_core::{FileSource, SampleSource};
use uniformity_tests::{AutocorrelationParams, BinRange, ChiSquareParams, GapParams, PokerParams};

use super::single::SingleTest;
use crate::error::CliError;
use crate::present;

const MENU: &str = "\nSelect a test to perform:
1) Autocorrelation Test
2) Gap Test
3) Poker Test
4) KS Test
5) Chi-Square Test
6) Exit
";

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Ask until the answer parses as `T`.
    fn ask<T: FromStr>(&mut self, prompt: &str) -> std::io::Result<Option<T>> {
        loop {
            let Some(answer) = self.line(prompt)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "'{answer}' is not a valid number.")?,
            }
        }
    }
}

pub fn run(input_path: Option<&str>) -> Result<(), CliError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(input_path, stdin.lock(), stdout.lock())
}

pub fn run_with<R: BufRead, W: Write>(
    input_path: Option<&str>,
    input: R,
    output: W,
) -> Result<(), CliError> {
    let mut prompt = Prompter { input, output };

    let path = match input_path {
        Some(path) => path.to_string(),
        None => match prompt.line("Enter the filename containing random numbers: ")? {
            Some(path) => path,
            None => return Ok(()),
        },
    };
    let sample = FileSource::new(&path).load()?;
    writeln!(prompt.output, "Loaded {} values from {path}", sample.len())?;

    loop {
        write!(prompt.output, "{MENU}")?;
        let Some(choice) = prompt.line("Enter your choice: ")? else {
            return Ok(());
        };
        let Some((test, alpha)) = (match choice.as_str() {
            "1" => ask_autocorrelation(&mut prompt)?,
            "2" => ask_gap(&mut prompt)?,
            "3" => with_alpha(&mut prompt, SingleTest::Poker(PokerParams::default()))?,
            "4" => with_alpha(&mut prompt, SingleTest::Ks)?,
            "5" => ask_chi_square(&mut prompt)?,
            "6" => {
                writeln!(prompt.output, "Exiting the program.")?;
                return Ok(());
            }
            _ => {
                writeln!(prompt.output, "Invalid choice. Please select a valid option.")?;
                continue;
            }
        }) else {
            return Ok(());
        };

        match test.run(&sample, alpha) {
            Ok(result) => {
                write!(prompt.output, "{}", present::format_result(&result))?;
                if let Some(table) = present::format_frequency_table(&result) {
                    write!(prompt.output, "\n{table}")?;
                }
            }
            Err(e) => writeln!(prompt.output, "error: {e}")?,
        }
    }
}

const ALPHA_PROMPT: &str = "Enter the significance level (alpha): ";

/// A test choice with its parameters and significance level, `None` at end of input.
type Choice = Option<(SingleTest, f64)>;

fn with_alpha<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    test: SingleTest,
) -> std::io::Result<Choice> {
    Ok(prompt.ask::<f64>(ALPHA_PROMPT)?.map(|alpha| (test, alpha)))
}

fn ask_autocorrelation<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> std::io::Result<Choice> {
    let Some(lag) = prompt.ask::<usize>("Enter the lag (k): ")? else {
        return Ok(None);
    };
    with_alpha(prompt, SingleTest::Autocorrelation(AutocorrelationParams { lag }))
}

fn ask_gap<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> std::io::Result<Choice> {
    let Some(lower) = prompt.ask::<f64>("Enter the lower bound: ")? else {
        return Ok(None);
    };
    let Some(upper) = prompt.ask::<f64>("Enter the upper bound: ")? else {
        return Ok(None);
    };
    with_alpha(prompt, SingleTest::Gap(GapParams { lower, upper }))
}

// Alpha comes before the bin count here.
fn ask_chi_square<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
) -> std::io::Result<Choice> {
    let Some(alpha) = prompt.ask::<f64>(ALPHA_PROMPT)? else {
        return Ok(None);
    };
    let Some(bins) = prompt.ask::<usize>("Enter the number of bins: ")? else {
        return Ok(None);
    };
    let test = SingleTest::ChiSquare {
        params: ChiSquareParams {
            bins,
            range: BinRange::UnitInterval,
        },
        table: true,
        histogram: false,
    };
    Ok(Some((test, alpha)))
}
