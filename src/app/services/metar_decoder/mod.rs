//! METAR report decoder
//!
//! This module turns one raw report line from a cycle bulletin into a typed
//! [`Observation`](crate::app::models::Observation), keeping only wind,
//! temperature, dew point and pressure, converted to SI units.
//!
//! ## Architecture
//!
//! - [`decoder`] - Tokenisation and group dispatch for a whole report
//! - [`groups`] - Pattern matching and unit conversion for individual groups
//! - [`time`] - Resolution of the day/hour/minute group into an absolute UTC instant
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use metar_ingest::app::services::metar_decoder::decode;
//!
//! let now = Utc.with_ymd_and_hms(2024, 10, 18, 12, 5, 0).unwrap();
//! let obs = decode("KJFK 181151Z 00000KT 10SM CLR 00/M05 Q1013", now).unwrap();
//!
//! assert_eq!(obs.station_id, "KJFK");
//! assert_eq!(obs.wind_dir, Some(0.0));
//! assert_eq!(obs.temp, Some(273.15));
//! assert_eq!(obs.press, Some(101_300.0));
//! ```
//!
//! Decoding never panics on malformed input: a report whose grammar cannot be
//! recognised yields a [`DecodeError`], which callers treat as "no observation".

pub mod decoder;
pub mod groups;
pub mod time;

#[cfg(test)]
pub mod tests;

pub use decoder::{DecodeError, decode};
pub use time::resolve_observation_time;
