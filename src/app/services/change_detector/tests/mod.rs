//! Tests for the change detector module


use crate::app::models::{Observation, Snapshot};
use chrono::{TimeZone, Utc};

/// Observation for `station_id` at 2024-10-18 `hour`:`minute`Z with a temperature
pub fn timed_observation(station_id: &str, hour: u32, minute: u32, temp: f64) -> Observation {
    let mut observation = Observation::new(
        station_id,
        Some(Utc.with_ymd_and_hms(2024, 10, 18, hour, minute, 0).unwrap()),
    );
    observation.temp = Some(temp);
    observation
}

/// Snapshot from a list of observations
pub fn snapshot_of(observations: Vec<Observation>) -> Snapshot {
    observations.into_iter().collect()
}
