//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::SeriesPoint;
use crate::dashboard::{format_count, CaseTotals, DashboardView};
use crate::dataset::CaseKind;

// ============================================
// REQUEST DTOs
// ============================================

/// Query string for `GET /api/v1/dashboard`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Country to render, defaults to the configured country
    #[serde(default)]
    pub country: Option<String>,
    /// Moving average window, defaults to the configured window
    #[serde(default)]
    pub window: Option<i64>,
}

/// Query string for `GET /api/v1/series/:kind/:country`
#[derive(Debug, Default, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    pub window: Option<i64>,
}

// ============================================
// RESPONSE DTOs
// ============================================

/// Country list for the selector
#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: Vec<String>,
    pub default_country: String,
    pub count: usize,
}

/// Totals formatted for the summary cards
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DisplayTotals {
    pub confirmed: String,
    pub dead: String,
    pub recovered: String,
}

impl From<CaseTotals> for DisplayTotals {
    fn from(totals: CaseTotals) -> Self {
        Self {
            confirmed: format_count(totals.confirmed),
            dead: format_count(totals.dead),
            recovered: format_count(totals.recovered),
        }
    }
}

/// Worldwide or per-country totals
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// "worldwide" or the country name
    pub scope: String,
    /// Date of the column the totals were read from
    pub as_of: Option<NaiveDate>,
    pub totals: CaseTotals,
    pub display: DisplayTotals,
}

/// A single transformed series
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub kind: CaseKind,
    pub country: String,
    pub window: usize,
    pub points: Vec<SeriesPoint>,
}

/// Full render result plus card strings
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub display: DashboardDisplay,
}

/// Card strings for the country and worldwide summaries
#[derive(Debug, Serialize)]
pub struct DashboardDisplay {
    pub country: DisplayTotals,
    pub worldwide: DisplayTotals,
}

impl From<DashboardView> for DashboardResponse {
    fn from(view: DashboardView) -> Self {
        let display = DashboardDisplay {
            country: view.country_totals.into(),
            worldwide: view.worldwide_totals.into(),
        };
        Self { view, display }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Dataset status
    pub dataset: String,
    /// Number of countries loaded
    pub countries: usize,
    /// Number of date columns loaded
    pub dates: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
