//! Data models for METAR ingestion
//!
//! This module contains the decoded observation record, the per-station
//! snapshot built each poll cycle, and the record handed to the sink.

use crate::constants::{SINK_TIME_FORMAT, STATION_TAG, fields};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

// =============================================================================
// Observation Record Structure
// =============================================================================

/// A decoded METAR report
///
/// Every optional quantity is independently absent when the report does not
/// carry it. A present value is always finite, and zero is a legal value
/// distinct from absence (a calm wind from 000 degrees keeps `wind_dir = 0`).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Four-character ICAO station identifier
    pub station_id: String,

    /// Observation time; `None` when the report carried no time group
    pub time: Option<DateTime<Utc>>,

    /// Wind direction in degrees (true)
    pub wind_dir: Option<f64>,

    /// Wind speed in metres per second
    pub wind_speed: Option<f64>,

    /// Air temperature in kelvin
    pub temp: Option<f64>,

    /// Dew point in kelvin
    pub dewpt: Option<f64>,

    /// Altimeter / QNH pressure in pascals
    pub press: Option<f64>,
}

impl Observation {
    /// Create an observation for a station with every quantity absent
    pub fn new(station_id: impl Into<String>, time: Option<DateTime<Utc>>) -> Self {
        Self {
            station_id: station_id.into(),
            time,
            wind_dir: None,
            wind_speed: None,
            temp: None,
            dewpt: None,
            press: None,
        }
    }

    /// Present quantities paired with their sink field names, in output order
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            (fields::WIND_DIR, self.wind_dir),
            (fields::WIND_SPEED, self.wind_speed),
            (fields::TEMP, self.temp),
            (fields::DEWPT, self.dewpt),
            (fields::PRESS, self.press),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.filter(|v| v.is_finite()).map(|v| (name, v)))
    }

    /// Number of present quantities
    pub fn field_count(&self) -> usize {
        self.present_fields().count()
    }

    /// True when the observation carries a usable timestamp
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Latest observation per station within one polling window
///
/// Holds at most one entry per station; inserting a second observation for a
/// station replaces the first. Iteration is ordered by station identifier so
/// that downstream output is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    observations: BTreeMap<String, Observation>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an observation, returning the one it replaced
    pub fn insert(&mut self, observation: Observation) -> Option<Observation> {
        self.observations
            .insert(observation.station_id.clone(), observation)
    }

    /// Look up the observation for a station
    pub fn get(&self, station_id: &str) -> Option<&Observation> {
        self.observations.get(station_id)
    }

    /// True if the station has an entry
    pub fn contains(&self, station_id: &str) -> bool {
        self.observations.contains_key(station_id)
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if no station is present
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate over observations in station order
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.values()
    }

    /// Station identifiers in order
    pub fn station_ids(&self) -> impl Iterator<Item = &str> {
        self.observations.keys().map(String::as_str)
    }
}

impl FromIterator<Observation> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for observation in iter {
            snapshot.insert(observation);
        }
        snapshot
    }
}

// =============================================================================
// Sink Record
// =============================================================================

/// A sink-ready point: one station's fields at one instant
///
/// Never constructed with an empty field map; see
/// [`project`](crate::app::services::point_projector::project).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkRecord {
    /// Measurement (series) name
    pub measurement: String,

    /// Tag set, containing `station_id`
    pub tags: BTreeMap<String, String>,

    /// Present numeric fields only
    pub fields: BTreeMap<String, f64>,

    /// Observation time
    #[serde(rename = "time", serialize_with = "serialize_sink_time")]
    pub timestamp: DateTime<Utc>,
}

impl SinkRecord {
    /// Timestamp rendered in the sink's wall-clock convention
    pub fn time(&self) -> String {
        format_sink_time(&self.timestamp)
    }

    /// Station identifier tag, if set
    pub fn station_id(&self) -> Option<&str> {
        self.tags.get(STATION_TAG).map(String::as_str)
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_sink_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(SINK_TIME_FORMAT).to_string()
}

fn serialize_sink_time<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_sink_time(timestamp))
}
