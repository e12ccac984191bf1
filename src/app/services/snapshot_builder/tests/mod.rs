//! Tests for the snapshot builder module


use chrono::{DateTime, TimeZone, Utc};

/// Reference instant for builder tests: 2024-10-18 12:05Z
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 18, 12, 5, 0).unwrap()
}

/// Previous-hour bulletin as published on the NWS cycle server
pub fn previous_hour_bulletin() -> Vec<String> {
    [
        "2024/10/18 11:00",
        "KJFK 181051Z 30010KT 10SM FEW250 11/M02 A3013",
        "",
        "2024/10/18 11:00",
        "EGLL 181050Z 24008KT 9999 SCT035 13/09 Q1009",
        "",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Current-hour bulletin; repeats KJFK with a newer report
pub fn current_hour_bulletin() -> Vec<String> {
    [
        "2024/10/18 12:00",
        "KJFK 181151Z 31012KT 10SM FEW250 12/M01 A3012",
        "",
        "2024/10/18 12:00",
        "LFPG 181130Z 27036KMH 9999 00/M03 Q1013",
        "",
        "2024/10/18 12:00",
        "this is not a report",
        "",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
