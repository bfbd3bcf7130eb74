//! Analysis error types
//!
//! The aggregator and transformer are pure functions; these are the only
//! ways they can refuse an input.

use thiserror::Error;

/// Errors that can occur while aggregating or transforming a table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No row in the table has this country name.
    /// Distinct from a country that exists with zero cases.
    #[error("Country not found: {0}")]
    CountryNotFound(String),

    /// Moving average window must be at least 1
    #[error("Invalid window: {0} (must be at least 1)")]
    InvalidWindow(i64),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
