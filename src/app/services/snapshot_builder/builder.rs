//! Snapshot construction from bulletin lines

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::stats::{BuildResult, BuildStats};
use crate::app::models::Snapshot;
use crate::app::services::metar_decoder::decode;

/// True for lines that carry a report
///
/// Blank lines and bulletin timestamp headers (which start with a digit) are
/// not reports.
pub fn is_report_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(|c: char| c.is_ascii_digit())
}

/// Build a per-station snapshot from raw bulletin lines
///
/// Lines are decoded in order; when two reports decode to the same station
/// the later one wins.
///
/// # Arguments
///
/// * `lines` - Raw bulletin lines, previous-hour bulletin first
/// * `reference` - Current UTC instant handed to the decoder
pub fn build_snapshot<I, S>(lines: I, reference: DateTime<Utc>) -> BuildResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = BuildStats::new();
    let mut snapshot = Snapshot::new();

    for line in lines {
        let line = line.as_ref();
        stats.total_lines += 1;

        if !is_report_line(line) {
            continue;
        }
        stats.candidate_lines += 1;

        match decode(line, reference) {
            Ok(observation) => {
                stats.decoded += 1;
                if snapshot.insert(observation).is_some() {
                    stats.superseded += 1;
                }
            }
            Err(e) => {
                stats.parse_failures += 1;
                trace!("Rejected report '{}': {}", line.trim(), e);
            }
        }
    }

    debug!(
        "Built snapshot of {} stations: {}",
        snapshot.len(),
        stats.summary()
    );

    BuildResult { snapshot, stats }
}
