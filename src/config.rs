//! Configuration management and validation.
//!
//! Provides configuration structures for the bulletin source, the
//! time-series sink, polling and logging, loaded in layers: built-in
//! defaults, an optional JSON file, then environment variables. CLI flags
//! are applied on top by the command layer.

use crate::constants::{
    DEFAULT_BULLETIN_URL_TEMPLATE, DEFAULT_DATABASE, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_INFLUX_URL, DEFAULT_MEASUREMENT, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_WRITE_TIMEOUT_SECS, HOUR_PLACEHOLDER, LOG_LEVEL_DEFAULT, env_vars,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Upstream bulletin settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Bulletin URL with an `{hour}` placeholder
    pub url_template: String,

    /// Timeout for each fetch in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_BULLETIN_URL_TEMPLATE.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

/// Time-series sink settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// InfluxDB base URL
    pub url: String,

    /// Target database
    pub database: String,

    /// Measurement name for written points
    pub measurement: String,

    /// Optional basic-auth user
    pub username: Option<String>,

    /// Optional basic-auth password
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Timeout for each batch write in seconds
    pub write_timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INFLUX_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            measurement: DEFAULT_MEASUREMENT.to_string(),
            username: None,
            password: None,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
        }
    }
}

/// Poll loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Sleep between cycles in seconds
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl PollingConfig {
    /// Sleep between cycles
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level applied to this crate when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LOG_LEVEL_DEFAULT.to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub sink: SinkConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration: defaults, then `config_file` if given, then environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        Self::load_layered_with(config_file, |name| std::env::var(name).ok())
    }

    /// Load configuration with environment lookups going through `lookup`
    pub fn load_layered_with<F>(config_file: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(lookup)?;
        debug!(
            "Loaded configuration: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );
        Ok(config)
    }

    /// Read a JSON configuration file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Override settings from environment variables
    ///
    /// `lookup` returns the value of a variable, if set; it is a parameter so
    /// the layering can be exercised without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env_vars::SOURCE_URL_TEMPLATE) {
            self.source.url_template = value;
        }
        if let Some(value) = lookup(env_vars::FETCH_TIMEOUT_SECS) {
            self.source.fetch_timeout_secs = parse_env(env_vars::FETCH_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(env_vars::INFLUX_URL) {
            self.sink.url = value;
        }
        if let Some(value) = lookup(env_vars::INFLUX_DATABASE) {
            self.sink.database = value;
        }
        if let Some(value) = lookup(env_vars::INFLUX_MEASUREMENT) {
            self.sink.measurement = value;
        }
        if let Some(value) = lookup(env_vars::INFLUX_USERNAME) {
            self.sink.username = Some(value);
        }
        if let Some(value) = lookup(env_vars::INFLUX_PASSWORD) {
            self.sink.password = Some(value);
        }
        if let Some(value) = lookup(env_vars::WRITE_TIMEOUT_SECS) {
            self.sink.write_timeout_secs = parse_env(env_vars::WRITE_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(env_vars::POLL_INTERVAL_SECS) {
            self.polling.interval_secs = parse_env(env_vars::POLL_INTERVAL_SECS, &value)?;
        }
        Ok(())
    }

    /// Check the configuration for values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.source.url_template.contains(HOUR_PLACEHOLDER) {
            return Err(Error::configuration(format!(
                "Bulletin URL template must contain {}: {}",
                HOUR_PLACEHOLDER, self.source.url_template
            )));
        }

        let sample_url = self.source.url_template.replace(HOUR_PLACEHOLDER, "00");
        reqwest::Url::parse(&sample_url).map_err(|e| {
            Error::configuration(format!("Invalid bulletin URL template: {}", e))
        })?;

        reqwest::Url::parse(&self.sink.url)
            .map_err(|e| Error::configuration(format!("Invalid sink URL: {}", e)))?;

        if self.sink.database.trim().is_empty() {
            return Err(Error::configuration("Database name cannot be empty"));
        }

        if self.sink.measurement.trim().is_empty() {
            return Err(Error::configuration("Measurement name cannot be empty"));
        }

        if self.source.fetch_timeout_secs == 0 || self.sink.write_timeout_secs == 0 {
            return Err(Error::configuration(
                "Fetch and write timeouts must be greater than 0 seconds",
            ));
        }

        if self.polling.interval_secs == 0 {
            return Err(Error::configuration(
                "Poll interval must be greater than 0 seconds",
            ));
        }

        Ok(())
    }

    /// Set the sink URL
    pub fn with_sink_url(mut self, url: impl Into<String>) -> Self {
        self.sink.url = url.into();
        self
    }

    /// Set the target database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.sink.database = database.into();
        self
    }

    /// Set the poll interval
    pub fn with_interval_secs(mut self, interval_secs: u64) -> Self {
        self.polling.interval_secs = interval_secs;
        self
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::configuration(format!("Invalid value for {}: '{}'", name, value))
    })
}
