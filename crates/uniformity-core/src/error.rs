//! Errors raised while loading a sample.

use std::path::PathBuf;

/// Failure to produce a sample from a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: '{token}' is not a number")]
    Parse { line: usize, token: String },

    #[error("{origin} contains no values")]
    Empty { origin: String },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
