//! Command implementation for the METAR ingest service
//!
//! Wires configuration, logging, the HTTP bulletin source and the InfluxDB
//! sink into a [`Poller`] and runs it.

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{Error, Result};
use crate::app::adapters::bulletin_source::HttpBulletinSource;
use crate::app::adapters::influx_sink::InfluxSink;
use crate::app::services::poller::{PollStats, Poller};
use crate::cli::args::Args;
use crate::config::Config;

/// Main entry point for the service
///
/// Returns the poller's running totals once polling stops, either after a
/// single cycle with `--once` or when `cancel` fires.
pub async fn run(args: Args, cancel: CancellationToken) -> Result<PollStats> {
    args.validate()?;

    let config = load_configuration(&args)?;
    setup_logging(&config, args.quiet)?;

    info!("Starting METAR ingest");
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let source = HttpBulletinSource::new(&config.source)?;
    let sink = InfluxSink::new(&config.sink)?;
    info!(
        "Writing '{}' points to {} (database {})",
        config.sink.measurement,
        sink.write_url(),
        config.sink.database
    );

    let mut poller = Poller::new(source, sink, config.sink.measurement.clone());

    if args.once {
        let report = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(Error::processing_interrupted("Cycle interrupted by user"));
            }
            report = poller.run_cycle(Utc::now()) => report?,
        };
        info!("{}", report.summary());
        return Ok(poller.stats().clone());
    }

    poller.run(config.polling.interval(), cancel).await
}

/// Set up structured logging
///
/// `RUST_LOG` wins when set; otherwise this crate logs at the configured level.
fn setup_logging(config: &Config, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.as_str();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_ingest={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to set up logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> env -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    load_configuration_with(args, |name| std::env::var(name).ok())
}

fn load_configuration_with<F>(args: &Args, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::load_layered_with(args.config_file.as_deref(), lookup)?;

    apply_cli_overrides(&mut config, args);

    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(url) = &args.influx_url {
        config.sink.url = url.clone();
    }
    if let Some(database) = &args.database {
        config.sink.database = database.clone();
    }
    if let Some(interval_secs) = args.interval_secs {
        config.polling.interval_secs = interval_secs;
    }
    if let Some(level) = args.get_log_level() {
        config.logging.level = level.to_string();
    }
}
