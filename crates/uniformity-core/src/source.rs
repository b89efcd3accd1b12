//! Sample sources.
//!
//! Every source implements [`SampleSource`], which names the origin of the
//! data and loads it as a vector of reals. Loading never validates the range
//! of the values; the test battery does that per test.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SourceError};
use crate::text::parse_sample;

/// Something that can produce a sample of reals.
pub trait SampleSource {
    /// Human-readable origin, used in reports and error messages.
    fn describe(&self) -> String;

    /// Load the full sample. An empty result is an error.
    fn load(&self) -> Result<Vec<f64>>;
}

fn non_empty(values: Vec<f64>, origin: impl FnOnce() -> String) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(SourceError::Empty { origin: origin() });
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A text file in the sample format of [`crate::text`].
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<f64>> {
        let text = fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        let values = non_empty(parse_sample(&text)?, || self.describe())?;
        info!("loaded {} values from {}", values.len(), self.path.display());
        Ok(values)
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Any reader, consumed on the first load (stdin, pipes, in-memory buffers).
///
/// Later loads see an exhausted reader and report an empty sample.
pub struct ReaderSource<R> {
    label: String,
    reader: Mutex<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(label: impl Into<String>, reader: R) -> Self {
        Self {
            label: label.into(),
            reader: Mutex::new(reader),
        }
    }
}

impl ReaderSource<std::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new("<stdin>", std::io::stdin())
    }
}

impl<R: Read> SampleSource for ReaderSource<R> {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> Result<Vec<f64>> {
        let mut text = String::new();
        {
            let mut reader = self.reader.lock().unwrap_or_else(|e| e.into_inner());
            reader
                .read_to_string(&mut text)
                .map_err(|e| SourceError::io(&self.label, e))?;
        }
        let values = non_empty(parse_sample(&text)?, || self.describe())?;
        debug!("read {} values from {}", values.len(), self.label);
        Ok(values)
    }
}

// ---------------------------------------------------------------------------
// Generated
// ---------------------------------------------------------------------------

/// Pseudo-random Uniform[0,1) values from [`StdRng`].
///
/// With a seed the sample is reproducible; without one each load draws a
/// fresh OS-seeded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedSource {
    pub count: usize,
    pub seed: Option<u64>,
}

impl GeneratedSource {
    pub fn new(count: usize) -> Self {
        Self { count, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl SampleSource for GeneratedSource {
    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("generated({}, seed={seed})", self.count),
            None => format!("generated({})", self.count),
        }
    }

    fn load(&self) -> Result<Vec<f64>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let values: Vec<f64> = (0..self.count).map(|_| rng.random::<f64>()).collect();
        non_empty(values, || self.describe())
    }
}
