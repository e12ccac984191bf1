//! Cycle statistics for the poll loop

use std::time::Duration;

use crate::app::services::snapshot_builder::BuildStats;

/// Outcome of one completed cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Bulletin hours fetched, previous then current
    pub hours: (String, String),
    /// Snapshot build statistics
    pub build: BuildStats,
    /// Stations in the new snapshot
    pub stations: usize,
    /// Observations judged new
    pub deltas: usize,
    /// Records handed to the sink
    pub records: usize,
    /// New observations with no field to write
    pub skipped_empty: usize,
    /// Wall-clock duration of the cycle
    pub elapsed: Duration,
}

impl CycleReport {
    /// Summary line for logging
    pub fn summary(&self) -> String {
        format!(
            "Cycle {}Z+{}Z: {} stations, {} new, {} written, {} without fields ({} rejected reports) in {:.1}s",
            self.hours.0,
            self.hours.1,
            self.stations,
            self.deltas,
            self.records,
            self.skipped_empty,
            self.build.parse_failures,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Running totals across the lifetime of a poller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollStats {
    /// Cycles started
    pub cycles: u64,
    /// Cycles aborted by a fetch failure
    pub fetch_failures: u64,
    /// Cycles whose batch write failed
    pub write_failures: u64,
    /// Records written successfully
    pub records_written: u64,
    /// Records lost to failed writes
    pub records_dropped: u64,
}

impl PollStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycles that completed without error
    pub fn successful_cycles(&self) -> u64 {
        self.cycles
            .saturating_sub(self.fetch_failures + self.write_failures)
    }

    /// Summary line for logging
    pub fn summary(&self) -> String {
        format!(
            "{} cycles ({} fetch failures, {} write failures), {} records written, {} dropped",
            self.cycles,
            self.fetch_failures,
            self.write_failures,
            self.records_written,
            self.records_dropped
        )
    }
}
