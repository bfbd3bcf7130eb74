//! # Pandash
//!
//! Pandemic Trend Dashboard - worldwide and per-country confirmed, dead and
//! recovered case trends from wide time-series tables.
//!
//! ## Features
//!
//! - **Loading**: three CSV tables from URLs or files, schema-checked at startup
//! - **Totals**: worldwide and per-country totals from the latest date
//! - **Trends**: daily new cases smoothed with a trailing moving average
//! - **Dashboard**: one-page UI backed by a small JSON API
//!
//! ## Modules
//!
//! - [`dataset`]: Table types and the loader
//! - [`analysis`]: Aggregator and series transformer
//! - [`dashboard`]: Immutable dashboard state and the render operation
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pandash::config::Config;
//! use pandash::dashboard::DashboardData;
//! use pandash::dataset::DatasetLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = DatasetLoader::new(&config.dataset)?.load().await?;
//!     let data = DashboardData::new(dataset, config.dashboard);
//!
//!     let view = data.render("India", 7)?;
//!     println!("{}: {} points", view.chart.title, view.series.len());
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod logging;

// Re-export top-level types for convenience
pub use dataset::{
    CaseKind, Dataset, DatasetError, DatasetLoader, DatasetResult, RegionRow, TimeSeriesTable,
};

pub use analysis::{
    countries, country_total, overall_total, transform_series, AnalysisError, AnalysisResult,
    SeriesPoint, TransformedSeries, DEFAULT_PREFIX_DROP,
};

pub use dashboard::{format_count, CaseTotals, DashboardData, DashboardView, WindowControl};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, DashboardConfig, DatasetConfig, LoggingConfig,
};
