//! Pandash CLI
//!
//! Command-line interface for the pandemic dashboard:
//! - Serve the dashboard
//! - Print worldwide or country totals
//! - Print a smoothed trend
//! - List countries
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pandash::analysis::TransformedSeries;
use pandash::api::{serve, AppState};
use pandash::config::{generate_default_config, Config};
use pandash::dashboard::{format_count, CaseTotals, DashboardData};
use pandash::dataset::{CaseKind, DatasetLoader};
use pandash::logging::init_logging;

#[derive(Parser)]
#[command(name = "pandash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pandemic trend dashboard")]
#[command(long_about = "Pandash loads confirmed/dead/recovered case tables and serves a dashboard of\nworldwide and per-country totals with moving-average daily trends.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dataset and serve the dashboard
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print worldwide totals, or a country's totals
    Totals {
        #[arg(long)]
        country: Option<String>,
    },

    /// Print a smoothed daily trend
    Trend {
        /// Country/region name (default: configured country)
        #[arg(long)]
        country: Option<String>,
        /// Moving average window (default: configured window)
        #[arg(short, long, allow_negative_numbers = true)]
        window: Option<i64>,
        /// Table to read (confirmed, dead, recovered)
        #[arg(short, long, default_value = "confirmed")]
        kind: CaseKind,
    },

    /// List countries
    Countries,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Generating a config needs neither a config nor the dataset
    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_deref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    config.validate()?;
    init_logging(&config.logging);

    tracing::info!("Pandash v{}", env!("CARGO_PKG_VERSION"));

    let loader = DatasetLoader::new(&config.dataset)?;
    let dataset = loader.load().await.context("loading case tables")?;
    let data = Arc::new(DashboardData::new(dataset, config.dashboard.clone()));
    let stdout = std::io::stdout();

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            serve(AppState::new(Arc::clone(&data)), &config.api).await?;
        }

        Commands::Totals { country } => {
            let (scope, totals) = match country {
                Some(c) => {
                    let totals = data.country_totals(&c)?;
                    (c, totals)
                }
                None => ("Worldwide".to_string(), data.worldwide_totals()),
            };
            write_totals(stdout.lock(), cli.format, &scope, totals)?;
        }

        Commands::Trend {
            country,
            window,
            kind,
        } => {
            let country = country.unwrap_or_else(|| data.config().default_country.clone());
            let window = window.unwrap_or(data.config().default_window);

            let series = data.series(kind, &country, window)?;
            write_trend(stdout.lock(), cli.format, kind, &series)?;
        }

        Commands::Countries => write_countries(stdout.lock(), cli.format, data.countries())?,

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[derive(Serialize)]
struct TotalsRecord<'a> {
    scope: &'a str,
    confirmed: i64,
    dead: i64,
    recovered: i64,
}

fn write_totals<W: Write>(
    mut out: W,
    format: OutputFormat,
    scope: &str,
    totals: CaseTotals,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "scope": scope, "totals": totals });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.serialize(TotalsRecord {
                scope,
                confirmed: totals.confirmed,
                dead: totals.dead,
                recovered: totals.recovered,
            })?;
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "{}", scope)?;
            for kind in CaseKind::all() {
                writeln!(
                    out,
                    "  {:<10} {:>15}",
                    kind.to_string(),
                    format_count(totals.get(*kind))
                )?;
            }
        }
    }
    Ok(())
}

fn write_trend<W: Write>(
    mut out: W,
    format: OutputFormat,
    kind: CaseKind,
    series: &TransformedSeries,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(series)?)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["date", "value"])?;
            for point in &series.points {
                writer.write_record([point.date.to_string(), point.value.to_string()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(
                out,
                "{} {} ({}-day window)",
                series.country, kind, series.window
            )?;
            writeln!(out, "{:<12} {:>12}", "date", "value")?;
            for point in &series.points {
                writeln!(out, "{:<12} {:>12.1}", point.date, point.value)?;
            }
        }
    }
    Ok(())
}

fn write_countries<W: Write>(
    mut out: W,
    format: OutputFormat,
    countries: &[String],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(countries)?)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(["country"])?;
            for country in countries {
                writer.write_record([country])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            for country in countries {
                writeln!(out, "{}", country)?;
            }
        }
    }
    Ok(())
}
