//! Change detection between successive snapshots
//!
//! This module decides which observations in the latest snapshot are new
//! information relative to the snapshot retained from the previous cycle.
//!
//! # Change Rule
//!
//! A station is reported when it is absent from the previous snapshot or its
//! observation time differs. Only the time is compared: a station whose time
//! is unchanged is treated as unchanged even if its other fields differ.
//! Stations that disappear produce nothing; the output only ever appends.
//!
//! Observations without a time cannot be compared or written and are never
//! reported.

pub mod detector;

#[cfg(test)]
pub mod tests;

pub use detector::{diff, is_new_observation};
