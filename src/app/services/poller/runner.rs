//! Cycle execution and the poll loop

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::stats::{CycleReport, PollStats};
use crate::app::adapters::bulletin_source::{BulletinSource, bulletin_hours};
use crate::app::adapters::influx_sink::PointSink;
use crate::app::models::Snapshot;
use crate::app::services::change_detector::diff;
use crate::app::services::point_projector::project_all;
use crate::app::services::snapshot_builder::{BuildResult, build_snapshot};
use crate::Result;

/// Pipeline driver owning the bulletin source, the sink and the retained snapshot
pub struct Poller<S, K> {
    source: S,
    sink: K,
    measurement: String,
    previous: Snapshot,
    stats: PollStats,
}

impl<S, K> Poller<S, K>
where
    S: BulletinSource,
    K: PointSink,
{
    /// Create a poller with an empty retained snapshot
    pub fn new(source: S, sink: K, measurement: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            measurement: measurement.into(),
            previous: Snapshot::new(),
            stats: PollStats::new(),
        }
    }

    /// Snapshot retained from the last cycle that got past fetching
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    /// Running totals
    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Fetch the previous-hour then the current-hour bulletin for `now`
    ///
    /// Lines are concatenated in that order so that, within the combined
    /// window, a station's current-hour report supersedes its earlier one.
    pub async fn fetch_window(&self, now: DateTime<Utc>) -> Result<(Vec<String>, (String, String))> {
        let (previous_hour, current_hour) = bulletin_hours(now);

        let mut lines = self.source.fetch(&previous_hour).await?;
        let current = self.source.fetch(&current_hour).await?;
        lines.extend(current);

        Ok((lines, (previous_hour, current_hour)))
    }

    /// Run one fetch, decode, diff and write cycle
    ///
    /// # Errors
    ///
    /// * A fetch error is returned before the retained snapshot is touched
    /// * A write error is returned after the retained snapshot was replaced
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<CycleReport> {
        let started = Instant::now();
        self.stats.cycles += 1;

        let (lines, hours) = match self.fetch_window(now).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.stats.fetch_failures += 1;
                return Err(e);
            }
        };

        let BuildResult {
            snapshot: latest,
            stats: build,
        } = build_snapshot(&lines, now);
        debug!("Snapshot built: {}", build.summary());

        let deltas = diff(&self.previous, &latest);
        let delta_count = deltas.len();
        let records = project_all(deltas, &self.measurement);

        let write_result = if records.is_empty() {
            debug!("No new observations, skipping write");
            Ok(())
        } else {
            self.sink.write(&records).await
        };

        let report = CycleReport {
            hours,
            stations: latest.len(),
            build,
            deltas: delta_count,
            records: records.len(),
            skipped_empty: delta_count - records.len(),
            elapsed: started.elapsed(),
        };

        self.previous = latest;

        match write_result {
            Ok(()) => {
                self.stats.records_written += records.len() as u64;
                Ok(report)
            }
            Err(e) => {
                self.stats.write_failures += 1;
                self.stats.records_dropped += records.len() as u64;
                Err(e)
            }
        }
    }

    /// Run cycles every `interval` until `cancel` fires
    ///
    /// Cycle errors are logged and the loop carries on; the only way out is
    /// cancellation, which also interrupts the sleep between cycles.
    pub async fn run(&mut self, interval: Duration, cancel: CancellationToken) -> Result<PollStats> {
        info!("Polling every {}s", interval.as_secs());

        while !cancel.is_cancelled() {
            let cycle = tokio::select! {
                _ = cancel.cancelled() => break,
                cycle = self.run_cycle(Utc::now()) => cycle,
            };

            match cycle {
                Ok(report) => info!("{}", report.summary()),
                Err(e) if e.is_fetch() => warn!("Cycle aborted, snapshot kept: {}", e),
                Err(e) => error!("Cycle failed: {}", e),
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("Polling stopped: {}", self.stats.summary());
        Ok(self.stats.clone())
    }
}
