use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::region::BoundingBox;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub query: QueryConfig,
    pub region: BoundingBox,
    pub scheduler: SchedulerConfig,
    pub export: ExportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub request_timeout_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            endpoint: "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Base of the query window; every tick queries from here up to today.
    pub start_date: NaiveDate,
    pub min_magnitude: f64,
    /// Absent means the maxmagnitude parameter is omitted from the request.
    pub max_magnitude: Option<f64>,
    pub limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            min_magnitude: 5.0,
            max_magnitude: None,
            limit: 20_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub interval_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            interval_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub path: String,
    /// Maximum size of one log file, in MiB.
    #[serde(default = "default_log_size")]
    pub size: u64,
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_size() -> u64 {
    10
}

fn default_log_max_files() -> usize {
    5
}

/// Load configuration from a TOML file. A missing file is not an error: every
/// field has a built-in default.
pub fn load_config(path: &str) -> Result<Config> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_text = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_text)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();

        assert_eq!(
            config.catalog.endpoint,
            "https://earthquake.usgs.gov/fdsnws/event/1/query"
        );
        assert_eq!(config.catalog.request_timeout_seconds, 30);
        assert_eq!(
            config.query.start_date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert_eq!(config.query.min_magnitude, 5.0);
        assert!(config.query.max_magnitude.is_none());
        assert_eq!(config.query.limit, 20_000);
        assert_eq!(config.region.min_lat, -11.0);
        assert_eq!(config.region.max_lat, 6.0);
        assert_eq!(config.region.min_lon, 95.0);
        assert_eq!(config.region.max_lon, 141.0);
        assert_eq!(config.scheduler.interval_seconds, 30);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.logging.is_none());
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.query.limit, 20_000);
        assert_eq!(config.scheduler.interval_seconds, 30);
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: Config = toml::from_str("[query]\nmin_magnitude = 6.5\n").unwrap();
        assert_eq!(config.query.min_magnitude, 6.5);
        assert_eq!(config.query.limit, 20_000);
        assert_eq!(config.region.max_lon, 141.0);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let text = r#"
            [query]
            start_date = "2024-01-01"
            max_magnitude = 8.0

            [scheduler]
            interval_seconds = 5
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(
            config.query.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(config.query.max_magnitude, Some(8.0));
        assert_eq!(config.scheduler.interval_seconds, 5);
    }

    #[test]
    fn logging_section_requires_a_path() {
        let result: Result<Config, toml::de::Error> = toml::from_str("[logging]\nlevel = \"debug\"\n");
        assert!(
            result.is_err(),
            "a logging section without a path should be rejected"
        );
    }
}
