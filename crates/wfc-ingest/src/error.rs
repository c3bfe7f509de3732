//! Error types for waveform corpus ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the input tree.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Header or numerics file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Header Errors ===
    /// Header file has no record line.
    #[error("header is empty: {path}")]
    EmptyHeader { path: PathBuf },

    /// Header line could not be interpreted.
    #[error("malformed header {path} (line {line}): {reason}")]
    MalformedHeader {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    // === Numerics Errors ===
    /// Failed to decompress or parse a numerics table.
    #[error("failed to read numerics {path}: {source}")]
    NumericsRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Numerics table has no columns.
    #[error("numerics table has no columns: {path}")]
    EmptyNumerics { path: PathBuf },
}

impl IngestError {
    pub(crate) fn open(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound { path }
        } else {
            IngestError::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
