//! Series Transformer
//!
//! Turns a country's cumulative counts into a smoothed daily-new-case series:
//!
//! ```text
//! rows for country ─sum─► cumulative ─diff─► daily deltas ─MA(w)─► smoothed ─skip(prefix)─► series
//! ```
//!
//! Undefined points (the first date, and the first `w - 1` deltas before the
//! window is full) are omitted rather than carried as NaN, so a table with N
//! dates yields `max(0, (N - 1) - (w - 1) - prefix)` points. Negative deltas
//! from data corrections are kept as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, AnalysisResult};
use crate::dataset::TimeSeriesTable;

/// Leading smoothed points dropped to skip the early near-zero reporting period
pub const DEFAULT_PREFIX_DROP: usize = 40;

/// One point of a transformed series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Smoothed daily-delta series for one country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformedSeries {
    pub country: String,
    pub window: usize,
    pub points: Vec<SeriesPoint>,
}

impl TransformedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values without dates
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Cumulative series for a country, summed column-wise across its rows
pub fn country_cumulative(table: &TimeSeriesTable, country: &str) -> AnalysisResult<Vec<i64>> {
    let mut cumulative: Option<Vec<i64>> = None;

    for row in table.rows_for(country) {
        let acc = cumulative.get_or_insert_with(|| vec![0; table.dates.len()]);
        for (total, value) in acc.iter_mut().zip(&row.values) {
            *total += value;
        }
    }

    cumulative.ok_or_else(|| AnalysisError::CountryNotFound(country.to_string()))
}

/// First differences; the first element has no predecessor and is omitted
pub fn daily_deltas(cumulative: &[i64]) -> Vec<i64> {
    cumulative.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Trailing simple moving average over `window` points.
///
/// Points before the window is full are omitted. `window` must be at least 1.
pub fn moving_average(values: &[i64], window: usize) -> Vec<f64> {
    debug_assert!(window >= 1);
    if values.len() < window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len() - window + 1);
    let mut sum: i64 = values[..window].iter().sum();
    out.push(sum as f64 / window as f64);

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out.push(sum as f64 / window as f64);
    }

    out
}

/// Smoothed daily new cases for a country.
///
/// Fails with `CountryNotFound` when no row matches and `InvalidWindow` when
/// `window < 1`.
pub fn transform_series(
    table: &TimeSeriesTable,
    country: &str,
    window: i64,
    prefix_drop: usize,
) -> AnalysisResult<TransformedSeries> {
    let window = usize::try_from(window)
        .ok()
        .filter(|w| *w >= 1)
        .ok_or(AnalysisError::InvalidWindow(window))?;

    let cumulative = country_cumulative(table, country)?;
    let deltas = daily_deltas(&cumulative);
    let smoothed = moving_average(&deltas, window);

    // smoothed[i] covers deltas ending at index i + window - 1, i.e. dates[i + window]
    let points = smoothed
        .into_iter()
        .enumerate()
        .skip(prefix_drop)
        .map(|(i, value)| SeriesPoint {
            date: table.dates[i + window],
            value,
        })
        .collect();

    Ok(TransformedSeries {
        country: country.to_string(),
        window,
        points,
    })
}
