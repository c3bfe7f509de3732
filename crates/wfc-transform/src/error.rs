//! Error types for row derivation.

use thiserror::Error;

/// Errors that stop a whole row from being derived.
///
/// Field-level failures never surface here; they become empty values.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// Numerics row has no tick counter value.
    #[error("numerics row {row} has no tick counter")]
    MissingTicks { row: usize },

    /// Tick counter value is not an integer.
    #[error("numerics row {row} has invalid tick counter '{value}'")]
    InvalidTicks { row: usize, value: String },
}

/// Result type for derivation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
