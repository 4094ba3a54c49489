//! Error types for the tradescan-core library.
//!
//! Extraction itself never fails. The journal reports [`JournalError`];
//! configuration loading reports [`TradescanError`].

use thiserror::Error;

/// Main error type for the tradescan library.
#[derive(Error, Debug)]
pub enum TradescanError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to the trade journal.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Failed to open or create the journal file.
    #[error("failed to open journal {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to append a row.
    #[error("failed to append row: {0}")]
    Append(String),

    /// Failed to read rows back.
    #[error("failed to read journal: {0}")]
    Read(String),

    /// The journal header does not match the expected columns.
    #[error("unexpected journal header: {0}")]
    Header(String),
}

impl From<csv::Error> for JournalError {
    fn from(err: csv::Error) -> Self {
        JournalError::Read(err.to_string())
    }
}

/// Result type for the tradescan library.
pub type Result<T> = std::result::Result<T, TradescanError>;
