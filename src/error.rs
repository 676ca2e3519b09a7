//! Error types for the outliner library.

use std::io;
use thiserror::Error;

/// Result type alias for outliner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline extraction and ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A fragment violates the input contract (page 0 or a negative font size).
    ///
    /// This is the only hard failure in the core: malformed fragments are
    /// reported, never silently dropped. Sparse or unusual-but-valid input
    /// degrades to a best-effort outline instead.
    #[error("Invalid fragment on page {page}: {reason}")]
    InvalidFragment { page: u32, reason: String },

    /// Error in a fragment source backend (PDF parsing, JSON decoding, ...).
    #[error("Fragment source error: {0}")]
    Source(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Source(err.to_string())
    }
}
