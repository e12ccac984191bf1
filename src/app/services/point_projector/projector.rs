//! Sink record construction

use std::collections::BTreeMap;
use tracing::trace;

use crate::app::models::{Observation, SinkRecord};
use crate::constants::STATION_TAG;

/// Convert an observation into a sink record
///
/// # Arguments
///
/// * `observation` - A changed observation
/// * `measurement` - Measurement name for the record
///
/// # Returns
///
/// `None` when the observation has no present field or no time
pub fn project(observation: &Observation, measurement: &str) -> Option<SinkRecord> {
    let timestamp = observation.time?;

    let fields: BTreeMap<String, f64> = observation
        .present_fields()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    if fields.is_empty() {
        trace!("{}: no fields present, skipping", observation.station_id);
        return None;
    }

    let mut tags = BTreeMap::new();
    tags.insert(STATION_TAG.to_string(), observation.station_id.clone());

    Some(SinkRecord {
        measurement: measurement.to_string(),
        tags,
        fields,
        timestamp,
    })
}

/// Project a batch of observations, dropping those that yield no record
pub fn project_all<'a, I>(observations: I, measurement: &str) -> Vec<SinkRecord>
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations
        .into_iter()
        .filter_map(|observation| project(observation, measurement))
        .collect()
}
