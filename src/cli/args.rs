//! Command-line argument definitions for the METAR ingest service
//!
//! Every flag is optional; with none given the service polls forever using
//! the built-in defaults and any environment overrides.

use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the METAR ingest service
///
/// Polls the NOAA hourly METAR cycle bulletins and writes new observations
/// to an InfluxDB database.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "metar_ingest",
    version,
    about = "Poll NOAA METAR bulletins and write new observations to InfluxDB",
    long_about = "Fetches the previous-hour and current-hour METAR cycle bulletins on a fixed \
                  interval, decodes wind, temperature, dew point and pressure into SI units, and \
                  writes one point per station whose observation time changed since the last poll."
)]
pub struct Args {
    /// Path to a JSON configuration file
    ///
    /// Keys missing from the file take their defaults. Environment variables
    /// and the flags below override it.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// InfluxDB base URL
    #[arg(long = "influx-url", value_name = "URL", help = "InfluxDB base URL")]
    pub influx_url: Option<String>,

    /// Target database
    #[arg(
        short = 'd',
        long = "database",
        value_name = "NAME",
        help = "InfluxDB database to write to"
    )]
    pub database: Option<String>,

    /// Seconds to sleep between cycles
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "SECS",
        help = "Seconds between poll cycles"
    )]
    pub interval_secs: Option<u64>,

    /// Run a single cycle and exit
    ///
    /// Useful under cron or as a smoke test; the process exits non-zero when
    /// the cycle fails.
    #[arg(long = "once", help = "Run a single poll cycle and exit")]
    pub once: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.interval_secs == Some(0) {
            return Err(Error::configuration(
                "Poll interval must be greater than 0 seconds",
            ));
        }

        Ok(())
    }

    /// Log level requested by the verbosity flags, if any
    ///
    /// `None` leaves the configured level in place.
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}
