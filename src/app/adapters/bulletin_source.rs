//! Bulletin retrieval
//!
//! The [`BulletinSource`] trait is the fetch boundary of the pipeline;
//! [`HttpBulletinSource`] implements it against the NWS cycle file server.

use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use std::time::Duration;
use tracing::debug;

use crate::config::SourceConfig;
use crate::constants::HOUR_PLACEHOLDER;
use crate::{Error, Result};

/// A provider of hourly METAR bulletins
#[async_trait]
pub trait BulletinSource: Send + Sync {
    /// Fetch the bulletin for a two-digit UTC hour as a list of lines
    async fn fetch(&self, hour: &str) -> Result<Vec<String>>;
}

/// Previous and current two-digit UTC hours for `now`
///
/// Wraps at midnight, so 00Z pairs with the previous day's 23Z.
pub fn bulletin_hours(now: DateTime<Utc>) -> (String, String) {
    let current = now.hour();
    let previous = (current + 23) % 24;
    (format!("{:02}", previous), format!("{:02}", current))
}

/// Bulletin source backed by HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpBulletinSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpBulletinSource {
    /// Create a source from configuration
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template: config.url_template.clone(),
        })
    }

    /// URL of the bulletin for an hour
    pub fn url_for(&self, hour: &str) -> String {
        self.url_template.replace(HOUR_PLACEHOLDER, hour)
    }
}

#[async_trait]
impl BulletinSource for HttpBulletinSource {
    async fn fetch(&self, hour: &str) -> Result<Vec<String>> {
        let url = self.url_for(hour);
        debug!("Fetching bulletin {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(&url, "request failed", Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(&url, format!("HTTP status {}", status), None));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(&url, "failed to read body", Some(e)))?;

        let lines: Vec<String> = body.lines().map(str::to_string).collect();
        debug!("Fetched {} lines from {}", lines.len(), url);
        Ok(lines)
    }
}
