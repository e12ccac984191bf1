//! Snapshot diffing

use tracing::{debug, trace};

use crate::app::models::{Observation, Snapshot};

/// True if `latest` carries a time that `previous` does not
///
/// # Arguments
///
/// * `previous` - The station's observation from the previous snapshot, if any
/// * `latest` - The station's observation from the latest snapshot
pub fn is_new_observation(previous: Option<&Observation>, latest: &Observation) -> bool {
    if !latest.has_time() {
        return false;
    }

    match previous {
        None => true,
        Some(previous) => previous.time != latest.time,
    }
}

/// Observations in `latest` that are new relative to `previous`
///
/// The result borrows from `latest` and follows its station order.
///
/// # Arguments
///
/// * `previous` - Snapshot retained from the previous cycle
/// * `latest` - Snapshot built this cycle
pub fn diff<'a>(previous: &Snapshot, latest: &'a Snapshot) -> Vec<&'a Observation> {
    let mut untimed = 0;

    let deltas: Vec<&Observation> = latest
        .iter()
        .filter(|observation| {
            if !observation.has_time() {
                untimed += 1;
                trace!("{}: no observation time, not comparable", observation.station_id);
                return false;
            }
            is_new_observation(previous.get(&observation.station_id), observation)
        })
        .collect();

    debug!(
        "Change detection: {} of {} stations new or updated ({} without time)",
        deltas.len(),
        latest.len(),
        untimed
    );

    deltas
}
