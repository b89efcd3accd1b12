//! Plain-text sample format.
//!
//! One or more real numbers per line, separated by whitespace. Blank lines
//! are skipped and everything after `#` on a line is a comment. Values are
//! kept exactly as parsed; range checks belong to the tests that need them.

use std::io::Write;

use crate::error::{Result, SourceError};

/// Parse a whole text buffer into a sample.
///
/// Line numbers in [`SourceError::Parse`] are 1-based. An input without any
/// value yields an empty vector; callers decide whether that is an error.
pub fn parse_sample(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| SourceError::Parse {
                line: index + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Write one value per line, in shortest round-trip form.
pub fn write_sample<W: Write>(writer: &mut W, values: &[f64]) -> std::io::Result<()> {
    for value in values {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}
