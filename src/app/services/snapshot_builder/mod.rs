//! Snapshot builder for cycle bulletins
//!
//! This module folds the raw lines of one or more hourly bulletins into a
//! [`Snapshot`](crate::app::models::Snapshot) holding the latest decoded
//! observation per station.
//!
//! - [`builder`] - Line filtering, decoding and last-write-wins folding
//! - [`stats`] - Build statistics and result structures
//!
//! Bulletin files interleave timestamp header lines (`2024/10/18 12:00`) and
//! blank lines with the reports themselves; only the reports are decoded.
//! Lines that fail to decode are counted and dropped.

pub mod builder;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use builder::{build_snapshot, is_report_line};
pub use stats::{BuildResult, BuildStats};
