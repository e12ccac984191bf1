//! Statistics for snapshot building

use crate::app::models::Snapshot;

/// Counts gathered while building a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildStats {
    /// Lines received from the bulletins
    pub total_lines: usize,
    /// Lines recognised as reports (not headers or blanks)
    pub candidate_lines: usize,
    /// Reports decoded successfully
    pub decoded: usize,
    /// Reports rejected by the decoder
    pub parse_failures: usize,
    /// Decoded reports superseded by a later report for the same station
    pub superseded: usize,
}

impl BuildStats {
    /// Create new empty build statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of candidate lines that decoded
    pub fn decode_rate(&self) -> f64 {
        if self.candidate_lines == 0 {
            100.0
        } else {
            (self.decoded as f64 / self.candidate_lines as f64) * 100.0
        }
    }

    /// Summary line for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} reports, {} decoded ({:.1}%), {} rejected, {} superseded",
            self.total_lines,
            self.candidate_lines,
            self.decoded,
            self.decode_rate(),
            self.parse_failures,
            self.superseded
        )
    }
}

/// A built snapshot together with its statistics
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub snapshot: Snapshot,
    pub stats: BuildStats,
}
