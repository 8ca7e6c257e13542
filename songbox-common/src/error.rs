//! Common error types for Songbox

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Songbox operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Songbox crates
///
/// Business outcomes (duplicate titles, bad indices, missing privileges) are
/// not errors; they are returned as [`crate::SubmitOutcome`] and
/// [`crate::RemoveOutcome`] values.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Song list could not be read from or written to disk
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O failure on the song list file
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }
}
