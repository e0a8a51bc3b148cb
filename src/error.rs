//! Error types for the merchant fee calculator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fee calculator operations
pub type Result<T> = std::result::Result<T, FeeError>;

/// Errors that can occur while reading, pricing or writing transactions.
#[derive(Error, Debug)]
pub enum FeeError {
    /// Failed to open, read or write a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line framing error from the underlying reader or writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A transaction line could not be parsed
    #[error("Invalid transaction at line {line}: {message}")]
    InvalidLine { line: u64, message: String },

    /// The directory given on the command line does not exist
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Processing stopped after too many read or write failures
    #[error("Aborted after {count} read/write errors")]
    TooManyErrors { count: usize },
}

impl FeeError {
    /// Returns `true` for errors caused by the content of a single line,
    /// as opposed to failures of the stream itself.
    pub fn is_invalid_line(&self) -> bool {
        matches!(self, FeeError::InvalidLine { .. })
    }
}
