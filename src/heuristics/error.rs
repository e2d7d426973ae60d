use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when loading marker lists.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("cannot read marker list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MarkerError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
