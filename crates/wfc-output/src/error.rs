//! Error types for CSV output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing catalog tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a table file.
    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush a table file.
    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
