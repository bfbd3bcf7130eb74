//! Dataset error types
//!
//! Everything that can go wrong while fetching or parsing the case tables.
//! All of these are fatal at startup.

use thiserror::Error;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading a local table failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Downloading a remote table failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote table answered with a non-success status
    #[error("HTTP status {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// A row does not fit the header
    #[error("Schema error at line {line}: {message}")]
    Schema { line: usize, message: String },

    /// A required identifying column is absent from the header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// The header has no date columns at all
    #[error("No date columns found in header")]
    NoDateColumns,

    /// A header after the first date column is not a date
    #[error("Invalid date header: {0}")]
    InvalidDate(String),

    /// The three tables disagree on their date columns
    #[error("Date schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
