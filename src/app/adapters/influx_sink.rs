//! Time-series sink
//!
//! The [`PointSink`] trait is the write boundary of the pipeline;
//! [`InfluxSink`] implements it with the InfluxDB 1.x HTTP write API using
//! line protocol at second precision.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::app::models::SinkRecord;
use crate::config::SinkConfig;
use crate::{Error, Result};

/// A destination for batches of sink records
#[async_trait]
pub trait PointSink: Send + Sync {
    /// Write a batch of records
    async fn write(&self, points: &[SinkRecord]) -> Result<()>;
}

/// Escape a measurement name
fn escape_measurement(name: &str) -> String {
    name.replace(',', "\\,").replace(' ', "\\ ")
}

/// Escape a tag key, tag value or field key
fn escape_key(key: &str) -> String {
    key.replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

/// Encode one record as a line protocol line
///
/// `metar,station_id=KJFK dewpt=272.15,temp=285.15 1729252260`
pub fn to_line_protocol(record: &SinkRecord) -> String {
    let mut line = escape_measurement(&record.measurement);

    for (key, value) in &record.tags {
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    let fields: Vec<String> = record
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", escape_key(key), value))
        .collect();

    line.push(' ');
    line.push_str(&fields.join(","));
    line.push(' ');
    line.push_str(&record.timestamp.timestamp().to_string());
    line
}

/// Encode a batch as a line protocol request body
pub fn encode_batch(points: &[SinkRecord]) -> String {
    points
        .iter()
        .map(to_line_protocol)
        .collect::<Vec<_>>()
        .join("\n")
}

/// InfluxDB 1.x sink over HTTP
#[derive(Debug, Clone)]
pub struct InfluxSink {
    client: reqwest::Client,
    write_url: String,
    database: String,
    credentials: Option<(String, String)>,
}

impl InfluxSink {
    /// Create a sink from configuration
    pub fn new(config: &SinkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.write_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), password) => Some((user.clone(), password.clone().unwrap_or_default())),
            _ => None,
        };

        Ok(Self {
            client,
            write_url: format!("{}/write", config.url.trim_end_matches('/')),
            database: config.database.clone(),
            credentials,
        })
    }

    /// Endpoint receiving writes
    pub fn write_url(&self) -> &str {
        &self.write_url
    }
}

#[async_trait]
impl PointSink for InfluxSink {
    async fn write(&self, points: &[SinkRecord]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let mut request = self
            .client
            .post(&self.write_url)
            .query(&[("db", self.database.as_str()), ("precision", "s")])
            .body(encode_batch(points));

        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::write(format!("request to {} failed", self.write_url), Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::write(
                format!(
                    "{} rejected {} points with status {}: {}",
                    self.database,
                    points.len(),
                    status,
                    body.trim()
                ),
                None,
            ));
        }

        debug!("Wrote {} points to {}", points.len(), self.database);
        Ok(())
    }
}
