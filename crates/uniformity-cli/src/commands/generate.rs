use std::fs::File;
use std::io::BufWriter;

use uniformity_core::{GeneratedSource, SampleSource, write_sample};

use crate::error::CliError;

/// Write `count` Uniform[0,1) draws, one per line, to `output_path` or stdout.
pub fn run(count: usize, seed: Option<u64>, output_path: Option<&str>) -> Result<(), CliError> {
    let source = GeneratedSource { count, seed };
    let values = source.load()?;

    match output_path {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::write(path, e))?;
            let mut writer = BufWriter::new(file);
            write_sample(&mut writer, &values).map_err(|e| CliError::write(path, e))?;
            eprintln!("Wrote {} values to {path}", values.len());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_sample(&mut writer, &values)?;
        }
    }
    Ok(())
}
