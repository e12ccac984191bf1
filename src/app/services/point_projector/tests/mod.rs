//! Tests for the point projector module


use crate::app::models::Observation;
use chrono::{TimeZone, Utc};

/// Observation at 2024-10-18 11:51Z with every quantity absent
pub fn bare_observation(station_id: &str) -> Observation {
    Observation::new(
        station_id,
        Some(Utc.with_ymd_and_hms(2024, 10, 18, 11, 51, 0).unwrap()),
    )
}

/// Observation at 2024-10-18 11:51Z with every quantity present
pub fn full_observation(station_id: &str) -> Observation {
    let mut observation = bare_observation(station_id);
    observation.wind_dir = Some(310.0);
    observation.wind_speed = Some(6.17);
    observation.temp = Some(285.15);
    observation.dewpt = Some(272.15);
    observation.press = Some(101_998.0);
    observation
}
