//! Observation time resolution
//!
//! A METAR time group only carries day-of-month, hour and minute. The month
//! and year come from a reference instant supplied by the caller.

use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Resolve a `DDHHMMZ` group against a reference instant
///
/// The observation is placed in the reference month unless its day is later
/// than the reference day, in which case it belongs to the previous month
/// (a report from the 31st read on the 1st). Returns `None` when the fields
/// are out of range or the day does not exist in the resolved month.
///
/// # Arguments
///
/// * `day` - Day of month from the report
/// * `hour` - Hour of day from the report
/// * `minute` - Minute from the report
/// * `reference` - Current UTC instant
pub fn resolve_observation_time(
    day: u32,
    hour: u32,
    minute: u32,
    reference: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if day == 0 || day > 31 || hour > 23 || minute > 59 {
        return None;
    }

    let (mut year, mut month) = (reference.year(), reference.month());
    if day > reference.day() {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
}
