//! Error types for the briefmark library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for briefmark operations.
#[derive(Debug, Error)]
pub enum BriefmarkError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is not a list of objects.
    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    /// One element of the input list is unusable.
    #[error("Invalid record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },

    /// Empty file or no records to review.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Mark outside the 1-5 scale.
    #[error("Invalid mark {0}: expected a value from 1 to 5")]
    InvalidMark(i64),

    /// The session holds no records.
    #[error("Session has no records")]
    EmptySession,

    /// Export requested before every record was scored.
    #[error("Only {labeled} of {total} records are marked")]
    Incomplete { labeled: usize, total: usize },

    /// Error saving or loading sessions and exports.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for briefmark operations.
pub type Result<T> = std::result::Result<T, BriefmarkError>;
