//! Dashboard
//!
//! Immutable state built once at startup plus the single render operation the
//! UI drives: `(country, window) -> (series, totals)`.
//!
//! Worldwide totals are computed when `DashboardData` is built; everything
//! else is recomputed per call. Nothing here mutates after construction, so a
//! `DashboardData` can be shared across requests behind an `Arc` without locks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{
    self, country_total, overall_total, transform_series, AnalysisResult, TransformedSeries,
};
use crate::config::DashboardConfig;
use crate::dataset::{CaseKind, Dataset};

/// Confirmed/dead/recovered scalars
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CaseTotals {
    pub confirmed: i64,
    pub dead: i64,
    pub recovered: i64,
}

impl CaseTotals {
    pub fn get(&self, kind: CaseKind) -> i64 {
        match kind {
            CaseKind::Confirmed => self.confirmed,
            CaseKind::Dead => self.dead,
            CaseKind::Recovered => self.recovered,
        }
    }
}

/// Chart title and axis labels for a rendered series
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
}

impl ChartLabels {
    pub fn new(country: &str, window: usize) -> Self {
        let y_axis = if window == 1 {
            "Daily Cases".to_string()
        } else {
            format!("Daily Cases ({}-day MA)", window)
        };

        Self {
            title: format!("Daily confirmed cases trend for {}", country),
            x_axis: "Date".to_string(),
            y_axis,
        }
    }
}

/// A labelled stop on the window slider
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WindowMark {
    pub value: i64,
    pub label: String,
}

/// Bounds and marks for the moving average slider
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WindowControl {
    pub min: i64,
    pub max: i64,
    pub default: i64,
    /// `None` means the slider only stops on `marks`
    pub step: Option<i64>,
    pub marks: Vec<WindowMark>,
}

impl WindowControl {
    pub fn new(config: &DashboardConfig) -> Self {
        let marks = [
            (1, "1"),
            (3, "3"),
            (5, "5"),
            (7, "1-Week"),
            (14, "Fortnight"),
        ]
        .into_iter()
        .filter(|(value, _)| *value <= config.max_window)
        .map(|(value, label)| WindowMark {
            value,
            label: label.to_string(),
        })
        .collect();

        Self {
            min: 1,
            max: config.max_window,
            default: config.default_window,
            step: None,
            marks,
        }
    }

    pub fn contains(&self, window: i64) -> bool {
        (self.min..=self.max).contains(&window)
    }
}

/// Everything one UI interaction needs to redraw
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub country: String,
    pub window: usize,
    pub as_of: Option<NaiveDate>,
    pub chart: ChartLabels,
    pub series: TransformedSeries,
    pub country_totals: CaseTotals,
    pub worldwide_totals: CaseTotals,
}

/// Loaded tables plus values derived once at load time
#[derive(Debug)]
pub struct DashboardData {
    dataset: Dataset,
    config: DashboardConfig,
    worldwide: CaseTotals,
    countries: Vec<String>,
}

impl DashboardData {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let worldwide = CaseTotals {
            confirmed: overall_total(&dataset.confirmed),
            dead: overall_total(&dataset.dead),
            recovered: overall_total(&dataset.recovered),
        };
        let countries = analysis::countries(&dataset.confirmed);

        tracing::info!(
            countries = countries.len(),
            confirmed = worldwide.confirmed,
            dead = worldwide.dead,
            recovered = worldwide.recovered,
            "Worldwide totals computed"
        );

        Self {
            dataset,
            config,
            worldwide,
            countries,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Worldwide totals, fixed for the life of the process
    pub fn worldwide_totals(&self) -> CaseTotals {
        self.worldwide
    }

    /// Sorted country names from the confirmed table
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn window_control(&self) -> WindowControl {
        WindowControl::new(&self.config)
    }

    /// Totals for one country.
    ///
    /// The country must exist in the confirmed table. A table that simply has
    /// no row for it (the recovered table groups some countries differently)
    /// contributes zero.
    pub fn country_totals(&self, country: &str) -> AnalysisResult<CaseTotals> {
        let confirmed = country_total(&self.dataset.confirmed, country)?;
        let secondary = |kind: CaseKind| {
            let table = self.dataset.table(kind);
            if table.has_country(country) {
                country_total(table, country)
            } else {
                Ok(0)
            }
        };

        Ok(CaseTotals {
            confirmed,
            dead: secondary(CaseKind::Dead)?,
            recovered: secondary(CaseKind::Recovered)?,
        })
    }

    /// Smoothed daily series from any of the three tables
    pub fn series(
        &self,
        kind: CaseKind,
        country: &str,
        window: i64,
    ) -> AnalysisResult<TransformedSeries> {
        transform_series(
            self.dataset.table(kind),
            country,
            window,
            self.config.prefix_drop,
        )
    }

    /// Recompute the chart and summary for the current inputs
    pub fn render(&self, country: &str, window: i64) -> AnalysisResult<DashboardView> {
        let series = self.series(CaseKind::Confirmed, country, window)?;
        let country_totals = self.country_totals(country)?;

        tracing::debug!(
            country,
            window,
            points = series.len(),
            "Rendered dashboard"
        );

        Ok(DashboardView {
            country: country.to_string(),
            window: series.window,
            as_of: analysis::latest_date(&self.dataset.confirmed),
            chart: ChartLabels::new(country, series.window),
            series,
            country_totals,
            worldwide_totals: self.worldwide,
        })
    }
}

/// Thousands-separated count, e.g. `1,234,567`
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::dataset::{RegionRow, TimeSeriesTable};

    /// Small three-table dataset: India, Canada (two provinces), Vatican
    pub fn dataset() -> Dataset {
        let dates: Vec<NaiveDate> = (22..=28)
            .map(|d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap())
            .collect();

        let confirmed = TimeSeriesTable::new(
            dates.clone(),
            vec![
                RegionRow::new("India", vec![10, 10, 12, 15, 15, 20, 26]),
                RegionRow::new("Canada", vec![1, 2, 3, 4, 5, 6, 7]).province("Ontario"),
                RegionRow::new("Canada", vec![0, 0, 1, 1, 2, 2, 3]).province("Quebec"),
                RegionRow::new("Vatican", vec![0; 7]),
            ],
        );
        let dead = TimeSeriesTable::new(
            dates.clone(),
            vec![
                RegionRow::new("India", vec![0, 0, 0, 1, 1, 1, 2]),
                RegionRow::new("Canada", vec![0, 0, 0, 0, 0, 1, 1]).province("Ontario"),
                RegionRow::new("Canada", vec![0; 7]).province("Quebec"),
                RegionRow::new("Vatican", vec![0; 7]),
            ],
        );
        let recovered = TimeSeriesTable::new(
            dates,
            vec![
                RegionRow::new("India", vec![0, 1, 2, 3, 5, 8, 13]),
                RegionRow::new("Canada", vec![0, 0, 0, 1, 1, 2, 4]),
            ],
        );

        Dataset::new(confirmed, dead, recovered)
    }

    pub fn config() -> DashboardConfig {
        DashboardConfig {
            prefix_drop: 0,
            ..DashboardConfig::default()
        }
    }

    pub fn data() -> DashboardData {
        DashboardData::new(dataset(), config())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::data;
    use super::*;
    use crate::analysis::AnalysisError;

    #[test]
    fn test_worldwide_totals_computed_once() {
        let data = data();
        assert_eq!(
            data.worldwide_totals(),
            CaseTotals {
                confirmed: 36,
                dead: 3,
                recovered: 17,
            }
        );
    }

    #[test]
    fn test_country_totals() {
        let data = data();
        assert_eq!(
            data.country_totals("Canada").unwrap(),
            CaseTotals {
                confirmed: 10,
                dead: 1,
                recovered: 4,
            }
        );
        // absent from the recovered table but present in confirmed
        assert_eq!(data.country_totals("Vatican").unwrap().recovered, 0);
        assert!(matches!(
            data.country_totals("Atlantis"),
            Err(AnalysisError::CountryNotFound(_))
        ));
    }

    #[test]
    fn test_render() {
        let data = data();
        let view = data.render("India", 2).unwrap();

        assert_eq!(view.series.values(), vec![1.0, 2.5, 1.5, 2.5, 5.5]);
        assert_eq!(view.window, 2);
        assert_eq!(view.country_totals.confirmed, 26);
        assert_eq!(view.worldwide_totals.confirmed, 36);
        assert_eq!(view.as_of, NaiveDate::from_ymd_opt(2020, 1, 28));
        assert_eq!(view.chart.title, "Daily confirmed cases trend for India");
        assert_eq!(view.chart.y_axis, "Daily Cases (2-day MA)");
    }

    #[test]
    fn test_render_unknown_country_and_bad_window() {
        let data = data();
        assert_eq!(
            data.render("Atlantis", 3).unwrap_err(),
            AnalysisError::CountryNotFound("Atlantis".to_string())
        );
        assert_eq!(
            data.render("India", 0).unwrap_err(),
            AnalysisError::InvalidWindow(0)
        );
    }

    #[test]
    fn test_series_by_kind() {
        let data = data();
        let recovered = data.series(CaseKind::Recovered, "India", 1).unwrap();
        assert_eq!(recovered.values(), vec![1.0, 1.0, 1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_chart_labels_without_smoothing() {
        let labels = ChartLabels::new("Canada", 1);
        assert_eq!(labels.y_axis, "Daily Cases");
        assert_eq!(labels.x_axis, "Date");
    }

    #[test]
    fn test_window_control() {
        let control = WindowControl::new(&DashboardConfig::default());
        assert_eq!(control.min, 1);
        assert_eq!(control.max, 15);
        assert_eq!(control.default, 3);
        assert_eq!(control.marks.len(), 5);
        assert_eq!(control.marks[3].label, "1-Week");
        assert_eq!(control.step, None);
        assert!(control.contains(14));
        assert!(!control.contains(16));
        assert!(!control.contains(0));

        let narrow = WindowControl::new(&DashboardConfig {
            max_window: 5,
            ..DashboardConfig::default()
        });
        assert_eq!(narrow.marks.len(), 3);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(-45000), "-45,000");
    }
}
