//! Core data types for the case tables
//!
//! - `CaseKind`: which of the three tables a value comes from
//! - `RegionRow`: one region's cumulative counts, one per date
//! - `TimeSeriesTable`: a wide table of regions by dates
//! - `Dataset`: the confirmed/dead/recovered triple loaded at startup

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which case table to read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    Confirmed,
    Dead,
    Recovered,
}

impl CaseKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [CaseKind] {
        &[CaseKind::Confirmed, CaseKind::Dead, CaseKind::Recovered]
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseKind::Confirmed => write!(f, "confirmed"),
            CaseKind::Dead => write!(f, "dead"),
            CaseKind::Recovered => write!(f, "recovered"),
        }
    }
}

impl std::str::FromStr for CaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(CaseKind::Confirmed),
            "dead" | "deaths" => Ok(CaseKind::Dead),
            "recovered" => Ok(CaseKind::Recovered),
            other => Err(format!("unknown case kind: {}", other)),
        }
    }
}

/// One region's row in a time-series table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionRow {
    /// Sub-region name, if the country is split
    pub province: Option<String>,
    /// Country/region name, the key rows are grouped by
    pub country: String,
    /// Cumulative counts, aligned with `TimeSeriesTable::dates`
    pub values: Vec<i64>,
}

impl RegionRow {
    pub fn new(country: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            province: None,
            country: country.into(),
            values,
        }
    }

    /// Builder method: set the sub-region
    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.province = Some(province.into());
        self
    }

    /// Value in the most recent date column
    pub fn latest(&self) -> Option<i64> {
        self.values.last().copied()
    }
}

/// Wide time-series table: rows are regions, columns are dates
///
/// Every row holds exactly `dates.len()` values. Tables are built once by the
/// loader and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<RegionRow>,
}

impl TimeSeriesTable {
    pub fn new(dates: Vec<NaiveDate>, rows: Vec<RegionRow>) -> Self {
        Self { dates, rows }
    }

    /// Rows belonging to a country
    pub fn rows_for<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a RegionRow> + 'a {
        self.rows.iter().filter(move |r| r.country == country)
    }

    /// Whether any row belongs to the country
    pub fn has_country(&self, country: &str) -> bool {
        self.rows.iter().any(|r| r.country == country)
    }

    /// Distinct country names
    pub fn country_set(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.country.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three case tables loaded together
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub confirmed: TimeSeriesTable,
    pub dead: TimeSeriesTable,
    pub recovered: TimeSeriesTable,
}

impl Dataset {
    pub fn new(
        confirmed: TimeSeriesTable,
        dead: TimeSeriesTable,
        recovered: TimeSeriesTable,
    ) -> Self {
        Self {
            confirmed,
            dead,
            recovered,
        }
    }

    pub fn table(&self, kind: CaseKind) -> &TimeSeriesTable {
        match kind {
            CaseKind::Confirmed => &self.confirmed,
            CaseKind::Dead => &self.dead,
            CaseKind::Recovered => &self.recovered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TimeSeriesTable {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 23).unwrap(),
        ];
        TimeSeriesTable::new(
            dates,
            vec![
                RegionRow::new("Canada", vec![1, 2]).province("Ontario"),
                RegionRow::new("Canada", vec![3, 4]).province("Quebec"),
                RegionRow::new("India", vec![0, 5]),
            ],
        )
    }

    #[test]
    fn test_rows_for_country() {
        let t = table();
        assert_eq!(t.rows_for("Canada").count(), 2);
        assert_eq!(t.rows_for("India").count(), 1);
        assert_eq!(t.rows_for("Atlantis").count(), 0);
        assert!(t.has_country("India"));
        assert!(!t.has_country("india"));
    }

    #[test]
    fn test_country_set_is_distinct() {
        let t = table();
        let set: Vec<&str> = t.country_set().into_iter().collect();
        assert_eq!(set, vec!["Canada", "India"]);
    }

    #[test]
    fn test_case_kind_parse() {
        assert_eq!("Confirmed".parse::<CaseKind>().unwrap(), CaseKind::Confirmed);
        assert_eq!("deaths".parse::<CaseKind>().unwrap(), CaseKind::Dead);
        assert!("active".parse::<CaseKind>().is_err());
        assert_eq!(CaseKind::Recovered.to_string(), "recovered");
    }
}
