//! Error types for the FastSS index.
//!
//! All fallible operations in this crate return [`FastssError`] through the
//! crate-wide [`Result`] alias. Storage backends report their own
//! [`StorageError`](crate::storage::StorageError), which converts into
//! [`FastssError::Storage`].
//!
//! # Examples
//!
//! ```
//! use fastss::error::{FastssError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FastssError::invalid_argument("empty word"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for FastSS operations.
#[derive(Error, Debug)]
pub enum FastssError {
    /// I/O errors (reading word lists, output streams).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing store is unavailable, opened in the wrong mode,
    /// or holds corrupt metadata.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A word expected in the index is missing from one of its postings.
    #[error("Word not found: {0}")]
    NotFound(String),

    /// Malformed bytes in a posting set, or a word that cannot be encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The caller passed a value the index cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization errors (CLI output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FastssError.
pub type Result<T> = std::result::Result<T, FastssError>;

impl FastssError {
    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        FastssError::Storage(msg.into())
    }

    /// Create a new not found error for the given word.
    pub fn not_found<S: Into<String>>(word: S) -> Self {
        FastssError::NotFound(word.into())
    }

    /// Create a new encoding error.
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        FastssError::Encoding(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FastssError::InvalidArgument(msg.into())
    }
}
