//! Application constants for the METAR ingest service
//!
//! This module contains unit conversion factors, default endpoints and
//! intervals, and the field names used throughout the pipeline.

// =============================================================================
// Upstream Bulletins
// =============================================================================

/// Hourly METAR cycle bulletins published by the NWS; `{hour}` is a two-digit UTC hour
pub const DEFAULT_BULLETIN_URL_TEMPLATE: &str =
    "https://tgftp.nws.noaa.gov/data/observations/metar/cycles/{hour}Z.TXT";

/// Placeholder substituted with the bulletin hour
pub const HOUR_PLACEHOLDER: &str = "{hour}";

/// Timeout applied to each bulletin fetch
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Time-Series Sink
// =============================================================================

/// Default InfluxDB HTTP endpoint
pub const DEFAULT_INFLUX_URL: &str = "http://localhost:8086";

/// Default database receiving observations
pub const DEFAULT_DATABASE: &str = "weather";

/// Default measurement name for written points
pub const DEFAULT_MEASUREMENT: &str = "metar";

/// Timeout applied to each batch write
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;

/// Wall-clock format expected by the sink (UTC, second precision)
pub const SINK_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Tag key carrying the station identifier
pub const STATION_TAG: &str = "station_id";

// =============================================================================
// Polling
// =============================================================================

/// Sleep between the end of one cycle and the start of the next
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Unit conversion factors for the decoded quantities
pub mod units {
    /// km/h per m/s
    pub const KMH_PER_MPS: f64 = 3.6;

    /// km/h per knot
    pub const KMH_PER_KNOT: f64 = 1.852;

    /// Offset between the Celsius and kelvin scales
    pub const CELSIUS_TO_KELVIN_OFFSET: f64 = 273.15;

    /// Pascals per hectopascal
    pub const PA_PER_HPA: f64 = 100.0;

    /// Hectopascals per inch of mercury
    pub const HPA_PER_INHG: f64 = 33.86398;

    /// Convert kilometres per hour to metres per second
    pub fn kmh_to_mps(kmh: f64) -> f64 {
        kmh / KMH_PER_MPS
    }

    /// Convert degrees Celsius to kelvin
    pub fn celsius_to_kelvin(celsius: f64) -> f64 {
        celsius + CELSIUS_TO_KELVIN_OFFSET
    }

    /// Convert hectopascals to pascals
    pub fn hpa_to_pa(hpa: f64) -> f64 {
        hpa * PA_PER_HPA
    }

    /// Convert inches of mercury to hectopascals
    pub fn inhg_to_hpa(inhg: f64) -> f64 {
        inhg * HPA_PER_INHG
    }
}

// =============================================================================
// Field Names
// =============================================================================

/// Field names written to the sink
pub mod fields {
    pub const WIND_DIR: &str = "wind_dir";
    pub const WIND_SPEED: &str = "wind_speed";
    pub const TEMP: &str = "temp";
    pub const DEWPT: &str = "dewpt";
    pub const PRESS: &str = "press";
}

// =============================================================================
// Report Grammar
// =============================================================================

/// Tokens after which the remainder of a report is not part of the observation
pub const REPORT_TERMINATORS: &[&str] = &["RMK", "TEMPO", "BECMG"];

/// Report type tokens that may precede the station identifier
pub const REPORT_TYPES: &[&str] = &["METAR", "SPECI"];

/// Modifier tokens following the time group
pub const REPORT_MODIFIERS: &[&str] = &["AUTO", "COR", "CCA", "CCB", "CCC", "RTD", "FINO"];

/// Marker for a missing report
pub const NIL_REPORT: &str = "NIL";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variables consulted when loading configuration
pub mod env_vars {
    pub const SOURCE_URL_TEMPLATE: &str = "METAR_SOURCE_URL_TEMPLATE";
    pub const FETCH_TIMEOUT_SECS: &str = "METAR_FETCH_TIMEOUT_SECS";
    pub const INFLUX_URL: &str = "METAR_INFLUX_URL";
    pub const INFLUX_DATABASE: &str = "METAR_INFLUX_DATABASE";
    pub const INFLUX_MEASUREMENT: &str = "METAR_INFLUX_MEASUREMENT";
    pub const INFLUX_USERNAME: &str = "METAR_INFLUX_USERNAME";
    pub const INFLUX_PASSWORD: &str = "METAR_INFLUX_PASSWORD";
    pub const WRITE_TIMEOUT_SECS: &str = "METAR_WRITE_TIMEOUT_SECS";
    pub const POLL_INTERVAL_SECS: &str = "METAR_POLL_INTERVAL_SECS";
}

/// Log levels selectable from the command line
pub const LOG_LEVEL_DEFAULT: &str = "info";

#[cfg(test)]
mod tests {
    use super::units::*;

    #[test]
    fn test_wind_conversion() {
        assert!((kmh_to_mps(36.0) - 10.0).abs() < 1e-9);
        assert_eq!(kmh_to_mps(0.0), 0.0);
    }

    #[test]
    fn test_temperature_conversion() {
        assert_eq!(celsius_to_kelvin(0.0), 273.15);
        assert!((celsius_to_kelvin(-40.0) - 233.15).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_conversion() {
        assert!((hpa_to_pa(1013.25) - 101_325.0).abs() < 1e-6);
        assert!((inhg_to_hpa(29.92) - 1013.2103).abs() < 1e-4);
        // A2992 in pascals
        assert!((hpa_to_pa(inhg_to_hpa(29.92)) - 101_321.03).abs() < 1e-2);
    }
}
