//! Pandash Analysis
//!
//! Pure computations over loaded case tables:
//!
//! - **aggregate**: worldwide and per-country totals from the latest date
//! - **transform**: cumulative → daily deltas → moving average → prefix drop
//!
//! # Example
//!
//! ```rust,ignore
//! use pandash::analysis::{country_total, transform_series, DEFAULT_PREFIX_DROP};
//!
//! let india = country_total(&dataset.confirmed, "India")?;
//! let trend = transform_series(&dataset.confirmed, "India", 7, DEFAULT_PREFIX_DROP)?;
//! ```

mod aggregate;
mod error;
mod transform;

pub use aggregate::{countries, country_total, latest_date, overall_total};
pub use error::{AnalysisError, AnalysisResult};
pub use transform::{
    country_cumulative, daily_deltas, moving_average, transform_series, SeriesPoint,
    TransformedSeries, DEFAULT_PREFIX_DROP,
};
