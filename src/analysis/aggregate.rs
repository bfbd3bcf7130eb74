//! Aggregator
//!
//! Scalar totals read from the most recent date column. Country totals sum
//! every row of the country so that countries split into sub-regions are
//! counted once as a whole.

use chrono::NaiveDate;

use super::error::{AnalysisError, AnalysisResult};
use crate::dataset::TimeSeriesTable;

/// Sum of every row's most recent value, regardless of country
pub fn overall_total(table: &TimeSeriesTable) -> i64 {
    table.rows.iter().filter_map(|r| r.latest()).sum()
}

/// Sum of the most recent value over the rows of one country
///
/// A country that exists with zero cases yields `Ok(0)`; an unknown country
/// is an error.
pub fn country_total(table: &TimeSeriesTable, country: &str) -> AnalysisResult<i64> {
    let mut found = false;
    let mut total = 0;

    for row in table.rows_for(country) {
        found = true;
        total += row.latest().unwrap_or(0);
    }

    if !found {
        return Err(AnalysisError::CountryNotFound(country.to_string()));
    }
    Ok(total)
}

/// Distinct country names, sorted
pub fn countries(table: &TimeSeriesTable) -> Vec<String> {
    table.country_set().into_iter().map(str::to_string).collect()
}

/// Date of the column totals are read from
pub fn latest_date(table: &TimeSeriesTable) -> Option<NaiveDate> {
    table.dates.last().copied()
}
