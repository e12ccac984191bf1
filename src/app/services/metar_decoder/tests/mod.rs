//! Tests for the METAR decoder module


use chrono::{DateTime, TimeZone, Utc};

/// Reference instant used by most decoder tests: 2024-10-18 12:05Z
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 18, 12, 5, 0).unwrap()
}

/// A complete US-style report
pub const KJFK_REPORT: &str =
    "KJFK 181151Z 31012KT 10SM FEW250 12/M01 A3012 RMK AO2 SLP199 T01221011";

/// A complete ICAO-style report with wind in km/h
pub const LFPG_REPORT: &str = "LFPG 181130Z 27036KMH 9999 SCT030 00/M03 Q1013 NOSIG";

/// Assert two floats agree to within a small tolerance
pub fn assert_close(actual: Option<f64>, expected: f64) {
    let value = actual.unwrap_or_else(|| panic!("expected {}, got None", expected));
    assert!(
        (value - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        value
    );
}
