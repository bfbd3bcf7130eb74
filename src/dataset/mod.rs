//! Pandash Dataset
//!
//! The case tables the dashboard is built on:
//!
//! - **types**: Core data structures (TimeSeriesTable, RegionRow, Dataset)
//! - **loader**: CSV parsing and HTTP/file fetching
//! - **error**: Error types
//!
//! # Load Path
//!
//! ```text
//!   Location (URL | file) → CSV text → TimeSeriesTable ×3 → schema check → Dataset
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pandash::config::DatasetConfig;
//! use pandash::dataset::DatasetLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = DatasetLoader::new(&DatasetConfig::default())?;
//!     let dataset = loader.load().await?;
//!
//!     println!("{} regions", dataset.confirmed.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{parse_table, validate_schema, DatasetLoader, Location, TableFormat};
pub use types::{CaseKind, Dataset, RegionRow, TimeSeriesTable};
