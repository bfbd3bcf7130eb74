//! Dataset Loader
//!
//! Fetches the three wide case tables (over HTTP or from local files) and
//! parses them into `TimeSeriesTable`s. Header layout:
//!
//! ```text
//! Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
//! ```
//!
//! Identifying columns come first; every header from the first parseable date
//! onwards must be a date. Load failures are fatal, there is no partial mode.

use chrono::NaiveDate;
use reqwest::Client;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{DatasetError, DatasetResult};
use super::types::{CaseKind, Dataset, RegionRow, TimeSeriesTable};
use crate::config::DatasetConfig;

/// How to interpret the header of a case table
#[derive(Debug, Clone)]
pub struct TableFormat {
    /// Header of the country/region column
    pub country_column: String,
    /// Header of the optional sub-region column
    pub province_column: String,
    /// strftime formats tried, in order, on each header
    pub date_formats: Vec<String>,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            country_column: "Country/Region".to_string(),
            province_column: "Province/State".to_string(),
            date_formats: vec![
                "%m/%d/%y".to_string(),
                "%m/%d/%Y".to_string(),
                "%Y-%m-%d".to_string(),
            ],
        }
    }
}

impl TableFormat {
    /// Parse a header as a date using the configured formats
    pub fn parse_date(&self, header: &str) -> Option<NaiveDate> {
        let header = header.trim();
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(header, fmt).ok())
    }
}

/// Parse one wide case table from CSV
pub fn parse_table<R: Read>(reader: R, format: &TableFormat) -> DatasetResult<TimeSeriesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();

    let country_idx = headers
        .iter()
        .position(|h| h.trim() == format.country_column)
        .ok_or_else(|| DatasetError::MissingColumn(format.country_column.clone()))?;
    let province_idx = headers
        .iter()
        .position(|h| h.trim() == format.province_column);

    let first_date = headers
        .iter()
        .position(|h| format.parse_date(h).is_some())
        .ok_or(DatasetError::NoDateColumns)?;

    let dates = headers
        .iter()
        .skip(first_date)
        .map(|h| {
            format
                .parse_date(h)
                .ok_or_else(|| DatasetError::InvalidDate(h.to_string()))
        })
        .collect::<DatasetResult<Vec<_>>>()?;

    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let line = line_num + 2;
        let record = result?;

        if record.len() != headers.len() {
            return Err(DatasetError::Schema {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        let country = record.get(country_idx).unwrap_or_default().trim().to_string();
        let province = province_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let values = record
            .iter()
            .skip(first_date)
            .map(|cell| {
                parse_count(cell).ok_or_else(|| DatasetError::Schema {
                    line,
                    message: format!("not a case count: {:?}", cell),
                })
            })
            .collect::<DatasetResult<Vec<_>>>()?;

        rows.push(RegionRow {
            province,
            country,
            values,
        });
    }

    Ok(TimeSeriesTable::new(dates, rows))
}

/// Parse a cumulative count cell. Empty and `NaN` cells count as zero.
fn parse_count(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(0);
    }
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    // Some exports write integral counts as floats ("12.0")
    match cell.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        Ok(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
            Some(v as i64)
        }
        _ => None,
    }
}

/// Where a table is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(String),
    File(PathBuf),
}

impl Location {
    /// `http://` and `https://` strings are URLs, anything else is a path
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Location::Url(s.to_string())
        } else {
            Location::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{}", url),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the confirmed/dead/recovered tables at startup
pub struct DatasetLoader {
    client: Client,
    format: TableFormat,
    confirmed: Location,
    dead: Location,
    recovered: Location,
}

impl DatasetLoader {
    /// Create a loader from the dataset configuration
    pub fn new(config: &DatasetConfig) -> DatasetResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            format: config.table_format(),
            confirmed: Location::parse(&config.confirmed),
            dead: Location::parse(&config.dead),
            recovered: Location::parse(&config.recovered),
        })
    }

    fn location(&self, kind: CaseKind) -> &Location {
        match kind {
            CaseKind::Confirmed => &self.confirmed,
            CaseKind::Dead => &self.dead,
            CaseKind::Recovered => &self.recovered,
        }
    }

    /// Load all three tables concurrently and check they share a date schema
    pub async fn load(&self) -> DatasetResult<Dataset> {
        let (confirmed, dead, recovered) = tokio::try_join!(
            self.load_table(CaseKind::Confirmed),
            self.load_table(CaseKind::Dead),
            self.load_table(CaseKind::Recovered),
        )?;

        let dataset = Dataset::new(confirmed, dead, recovered);
        validate_schema(&dataset)?;
        warn_row_key_mismatch(&dataset);

        Ok(dataset)
    }

    /// Load a single table
    pub async fn load_table(&self, kind: CaseKind) -> DatasetResult<TimeSeriesTable> {
        let location = self.location(kind);
        tracing::info!(kind = %kind, source = %location, "Loading case table");

        let text = self.fetch_text(location).await?;
        let table = parse_table(text.as_bytes(), &self.format)?;

        tracing::info!(
            kind = %kind,
            rows = table.len(),
            dates = table.dates.len(),
            "Case table loaded"
        );
        Ok(table)
    }

    async fn fetch_text(&self, location: &Location) -> DatasetResult<String> {
        match location {
            Location::Url(url) => {
                let response = self.client.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(DatasetError::HttpStatus {
                        url: url.clone(),
                        status: response.status().as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            Location::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

/// The three tables must have identical date columns
pub fn validate_schema(dataset: &Dataset) -> DatasetResult<()> {
    let reference = &dataset.confirmed.dates;

    for kind in [CaseKind::Dead, CaseKind::Recovered] {
        let dates = &dataset.table(kind).dates;
        if dates.len() != reference.len() {
            return Err(DatasetError::SchemaMismatch(format!(
                "{} table has {} date columns, confirmed has {}",
                kind,
                dates.len(),
                reference.len()
            )));
        }
        if let Some(idx) = dates.iter().zip(reference).position(|(a, b)| a != b) {
            return Err(DatasetError::SchemaMismatch(format!(
                "{} table column {} is {}, confirmed has {}",
                kind, idx, dates[idx], reference[idx]
            )));
        }
    }

    Ok(())
}

/// The recovered table in the public source groups some countries differently,
/// so differing country sets are reported but not rejected.
fn warn_row_key_mismatch(dataset: &Dataset) {
    let reference: BTreeSet<&str> = dataset.confirmed.country_set();

    for kind in [CaseKind::Dead, CaseKind::Recovered] {
        let countries = dataset.table(kind).country_set();
        let differing = reference.symmetric_difference(&countries).count();
        if differing > 0 {
            tracing::warn!(
                kind = %kind,
                differing,
                "Country set differs from confirmed table"
            );
        }
    }
}
