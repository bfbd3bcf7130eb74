//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::DEFAULT_PREFIX_DROP;
use crate::dataset::TableFormat;

const CONFIRMED_URL: &str =
    "https://raw.githubusercontent.com/snehitha06/covid19/main/time_series_covid_19_confirmed.csv";
const DEAD_URL: &str =
    "https://raw.githubusercontent.com/snehitha06/covid19/main/time_series_covid_19_deaths.csv";
const RECOVERED_URL: &str =
    "https://raw.githubusercontent.com/snehitha06/covid19/main/time_series_covid_19_recovered.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the case tables come from and how to read them
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// URL or file path of the confirmed-cases table
    #[serde(default = "default_confirmed")]
    pub confirmed: String,

    /// URL or file path of the deaths table
    #[serde(default = "default_dead")]
    pub dead: String,

    /// URL or file path of the recovered table
    #[serde(default = "default_recovered")]
    pub recovered: String,

    #[serde(default = "default_country_column")]
    pub country_column: String,

    #[serde(default = "default_province_column")]
    pub province_column: String,

    /// strftime formats tried on each date header
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_confirmed() -> String {
    CONFIRMED_URL.to_string()
}

fn default_dead() -> String {
    DEAD_URL.to_string()
}

fn default_recovered() -> String {
    RECOVERED_URL.to_string()
}

fn default_country_column() -> String {
    TableFormat::default().country_column
}

fn default_province_column() -> String {
    TableFormat::default().province_column
}

fn default_date_formats() -> Vec<String> {
    TableFormat::default().date_formats
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            confirmed: default_confirmed(),
            dead: default_dead(),
            recovered: default_recovered(),
            country_column: default_country_column(),
            province_column: default_province_column(),
            date_formats: default_date_formats(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl DatasetConfig {
    /// Header interpretation derived from this config
    pub fn table_format(&self) -> TableFormat {
        TableFormat {
            country_column: self.country_column.clone(),
            province_column: self.province_column.clone(),
            date_formats: self.date_formats.clone(),
        }
    }
}

/// Dashboard defaults and smoothing bounds
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Country shown before the user picks one
    #[serde(default = "default_country")]
    pub default_country: String,

    /// Moving average window shown before the user picks one
    #[serde(default = "default_window")]
    pub default_window: i64,

    /// Largest window the slider offers
    #[serde(default = "default_max_window")]
    pub max_window: i64,

    /// Leading smoothed points to drop
    #[serde(default = "default_prefix_drop")]
    pub prefix_drop: usize,
}

fn default_country() -> String {
    "India".to_string()
}

fn default_window() -> i64 {
    3
}

fn default_max_window() -> i64 {
    15
}

fn default_prefix_drop() -> usize {
    DEFAULT_PREFIX_DROP
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            default_window: default_window(),
            max_window: default_max_window(),
            prefix_drop: default_prefix_drop(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pandash").join("config.toml")),
            Some(PathBuf::from("/etc/pandash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject settings the dashboard could never render with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;
        if dashboard.max_window < 1 {
            return Err(ConfigError::Invalid(format!(
                "dashboard.max_window must be at least 1, got {}",
                dashboard.max_window
            )));
        }
        if dashboard.default_window < 1 || dashboard.default_window > dashboard.max_window {
            return Err(ConfigError::Invalid(format!(
                "dashboard.default_window must be between 1 and {}, got {}",
                dashboard.max_window, dashboard.default_window
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Dataset overrides
        if let Some(confirmed) = var("PANDASH_CONFIRMED") {
            self.dataset.confirmed = confirmed;
        }
        if let Some(dead) = var("PANDASH_DEAD") {
            self.dataset.dead = dead;
        }
        if let Some(recovered) = var("PANDASH_RECOVERED") {
            self.dataset.recovered = recovered;
        }

        // API overrides
        if let Some(host) = var("PANDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("PANDASH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = var("PANDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PANDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Pandash Configuration
#
# Environment variables override these settings:
# - PANDASH_CONFIRMED, PANDASH_DEAD, PANDASH_RECOVERED
# - PANDASH_API_HOST
# - PANDASH_API_PORT
# - PANDASH_LOG_LEVEL
# - PANDASH_LOG_FORMAT

[dataset]
# Case tables: http(s) URLs or local file paths
confirmed = "{confirmed}"
dead = "{dead}"
recovered = "{recovered}"

# Identifying columns
country_column = "Country/Region"
province_column = "Province/State"

# Date header formats, tried in order
date_formats = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"]

# Download timeout in seconds
request_timeout_secs = 30

[dashboard]
default_country = "India"
default_window = 3

# Largest moving average window offered
max_window = 15

# Leading smoothed points dropped from every series
prefix_drop = {prefix}

[api]
host = "0.0.0.0"
port = 8050

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        confirmed = CONFIRMED_URL,
        dead = DEAD_URL,
        recovered = RECOVERED_URL,
        prefix = DEFAULT_PREFIX_DROP,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dashboard.default_country, "India");
        assert_eq!(config.dashboard.default_window, 3);
        assert_eq!(config.dashboard.max_window, 15);
        assert_eq!(config.dashboard.prefix_drop, 40);
        assert_eq!(config.api.addr(), "0.0.0.0:8050");
        assert!(config.dataset.confirmed.starts_with("https://"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::parse(
            r#"
[dataset]
confirmed = "./data/confirmed.csv"

[dashboard]
prefix_drop = 0
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.confirmed, "./data/confirmed.csv");
        assert_eq!(config.dataset.dead, DEAD_URL);
        assert_eq!(config.dashboard.prefix_drop, 0);
        assert_eq!(config.dashboard.default_window, 3);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dataset.recovered, RECOVERED_URL);
        assert_eq!(config.dashboard.prefix_drop, DEFAULT_PREFIX_DROP);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PANDASH_API_PORT", "9000"),
            ("PANDASH_DEAD", "/tmp/dead.csv"),
            ("PANDASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9000);
        assert_eq!(config.dataset.dead, "/tmp/dead.csv");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_validate_dashboard_windows() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.dashboard.default_window = 20;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.dashboard.default_window = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.dashboard.max_window = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config::parse("[dashboard]\ndefault_window = 15\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pandash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nport = 1234\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.port, 1234);
    }
}
