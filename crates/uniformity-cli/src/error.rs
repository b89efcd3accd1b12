//! Errors surfaced by CLI commands.
//!
//! Every variant becomes a single `error: ...` line on stderr and exit
//! status 1. A rejected hypothesis is a result, not an error.

use std::path::PathBuf;

use uniformity_core::SourceError;
use uniformity_tests::TestError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// Sample could not be loaded
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A test refused its input or parameters
    #[error("{}: {0}", .0.kind())]
    Test(#[from] TestError),

    /// Battery configuration file unreadable or invalid
    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Output file could not be written
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Terminal or stdout failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line arguments that clap cannot rule out on its own
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
