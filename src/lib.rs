//! METAR Ingest Library
//!
//! A Rust library for turning NOAA hourly METAR cycle bulletins into a stream
//! of new observations written to a time-series database.
//!
//! This library provides tools for:
//! - Decoding raw METAR reports into wind, temperature, dew point and pressure in SI units
//! - Building per-station snapshots from adjacent hourly bulletins
//! - Detecting which stations reported a new observation time since the previous poll
//! - Projecting observations into sink records that omit absent fields
//! - Polling on a fixed interval and writing batches over InfluxDB line protocol

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod change_detector;
        pub mod metar_decoder;
        pub mod point_projector;
        pub mod poller;
        pub mod snapshot_builder;
    }
    pub mod adapters {
        pub mod bulletin_source;
        pub mod influx_sink;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Observation, SinkRecord, Snapshot};
pub use config::Config;

/// Result type alias for the METAR ingest service
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fetch, write and configuration failures
///
/// Report decoding failures are not represented here: they are recovered inside
/// the snapshot builder and never reach callers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bulletin retrieval failed (transport error, timeout or non-success status)
    #[error("Fetch error for '{url}': {message}")]
    Fetch {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The sink rejected a batch or could not be reached
    #[error("Write error: {message}")]
    Write {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a fetch error with context
    pub fn fetch(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a write error with context
    pub fn write(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Write {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for failures of the bulletin fetch boundary
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// True for failures of the sink write boundary
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
