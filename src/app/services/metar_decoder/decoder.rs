//! Whole-report decoding
//!
//! Walks the tokens of one report, recognising the station and time header
//! and then the first wind, temperature and pressure groups of the body.
//! Every other body group up to the remarks must still be a valid METAR group,
//! otherwise the report is rejected.

use chrono::{DateTime, Utc};
use tracing::trace;

use super::groups::{
    is_recognised_group, is_split_visibility, parse_bare_wind, parse_pressure, parse_station,
    parse_temperature, parse_time, parse_wind,
};
use super::time::resolve_observation_time;
use crate::app::models::Observation;
use crate::constants::{NIL_REPORT, REPORT_MODIFIERS, REPORT_TERMINATORS, REPORT_TYPES};

/// Reasons a report line could not be decoded
///
/// These never propagate past the snapshot builder; they are counted and dropped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing but whitespace
    #[error("empty report")]
    Empty,

    /// First token is not a station identifier
    #[error("missing station identifier (found '{token}')")]
    MissingStation { token: String },

    /// Time group out of range or not a real date
    #[error("invalid time group '{group}'")]
    InvalidTime { group: String },

    /// Wind direction beyond 360 degrees
    #[error("invalid wind group '{group}'")]
    InvalidWind { group: String },

    /// Body group matching no METAR group shape
    #[error("unparsed group '{group}'")]
    UnparsedGroup { group: String },
}

/// Decode one METAR report line
///
/// # Arguments
///
/// * `raw_line` - One report, without bulletin header lines
/// * `reference` - Current UTC instant used to place the report's day-of-month
///
/// # Returns
///
/// The decoded observation, or the reason the report was rejected
pub fn decode(raw_line: &str, reference: DateTime<Utc>) -> Result<Observation, DecodeError> {
    let line = raw_line.trim().trim_end_matches('=');
    let mut tokens = line.split_whitespace().peekable();

    while tokens.next_if(|t| REPORT_TYPES.contains(t)).is_some() {}

    let first = tokens.next().ok_or(DecodeError::Empty)?;
    let station_id = parse_station(first).ok_or_else(|| DecodeError::MissingStation {
        token: first.to_string(),
    })?;

    let mut observation = Observation::new(station_id, None);

    if let Some(group) = tokens.peek().copied() {
        if let Some(parsed) = parse_time(group) {
            tokens.next();
            let time = parsed
                .ok()
                .and_then(|t| resolve_observation_time(t.day, t.hour, t.minute, reference))
                .ok_or_else(|| DecodeError::InvalidTime {
                    group: group.to_string(),
                })?;
            observation.time = Some(time);
        }
    }

    let mut seen_wind = false;
    let mut seen_temperature = false;
    let mut seen_pressure = false;
    let mut first_group = true;

    while let Some(token) = tokens.next() {
        if REPORT_TERMINATORS.contains(&token) || token == NIL_REPORT {
            break;
        }
        if REPORT_MODIFIERS.contains(&token) {
            continue;
        }

        let wind = if std::mem::take(&mut first_group) {
            parse_wind(token).or_else(|| parse_bare_wind(token))
        } else {
            parse_wind(token)
        };
        if let Some(parsed) = wind {
            let wind = parsed.map_err(|_| DecodeError::InvalidWind {
                group: token.to_string(),
            })?;
            if !seen_wind {
                observation.wind_dir = wind.direction;
                observation.wind_speed = wind.speed;
                seen_wind = true;
            }
            continue;
        }

        if let Some(temperature) = parse_temperature(token) {
            if !seen_temperature {
                observation.temp = temperature.temp;
                observation.dewpt = temperature.dewpt;
                seen_temperature = true;
            }
            continue;
        }

        if let Some(pressure) = parse_pressure(token) {
            if !seen_pressure {
                observation.press = pressure;
                seen_pressure = true;
            }
            continue;
        }

        if is_recognised_group(token) {
            trace!("{}: skipping group '{}'", observation.station_id, token);
            continue;
        }

        if let Some(fraction) = tokens.next_if(|next| is_split_visibility(token, next)) {
            trace!("{}: skipping visibility '{} {}'", observation.station_id, token, fraction);
            continue;
        }

        return Err(DecodeError::UnparsedGroup {
            group: token.to_string(),
        });
    }

    Ok(observation)
}
