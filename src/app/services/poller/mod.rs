//! Poll loop orchestration
//!
//! This module drives the pipeline once per cycle:
//!
//! 1. **Fetch**: previous-hour and current-hour bulletins, in that order
//! 2. **Build**: decode the combined lines into a per-station snapshot
//! 3. **Detect**: diff against the snapshot retained from the previous cycle
//! 4. **Project**: turn changed observations into sink records
//! 5. **Persist**: write the batch, then retain the new snapshot
//!
//! # Failure Semantics
//!
//! A fetch failure aborts the cycle before anything else happens; the
//! retained snapshot is unchanged and the next cycle starts over. A write
//! failure is reported only after the retained snapshot has been replaced,
//! so the records of that cycle are not offered again. Neither is retried
//! within the cycle.
//!
//! The retained snapshot starts empty, so the first cycle after a restart
//! treats every station as new.

pub mod runner;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use runner::Poller;
pub use stats::{CycleReport, PollStats};
