//! Group parsers for METAR reports
//!
//! Each parser inspects a single whitespace-delimited token. `None` means the
//! token is not a group of that kind; `Some(Err(..))` means it has the shape of
//! the group but carries impossible values.
//!
//! Groups that are part of the report grammar but carry nothing the pipeline
//! keeps (visibility, weather, cloud, runway groups) are only recognised, see
//! [`is_recognised_group`].

use crate::constants::units;
use regex::{Regex, RegexSet};
use std::sync::LazyLock;

static STATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{3}$").unwrap());

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})Z?$").unwrap());

static WIND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<dir>\d{3}|VRB|///)P?(?P<speed>\d{2,3}|//)(?:GP?(?:\d{2,3}|//))?(?P<units>KTS|KT|KMH|MPS)?$")
        .unwrap()
});

static TEMPERATURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<tsign>M|-)?(?P<temp>\d+)|//|MM|XX)/(?:(?P<dsign>M|-)?(?P<dewpt>\d+)|//|MM|XX)?$")
        .unwrap()
});

static PRESSURE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<unit>[AQ])(?P<value>\d{4}|////)$").unwrap());

static OTHER_GROUP_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // visibility: metres with optional direction, statute miles, kilometres
        r"^(?:\d{4}(?:NDV|[NSEW]{1,2})?|[MP]?(?:\d+/)?\d+SM|\d+KM|////)$",
        // variable wind direction
        r"^\d{3}V\d{3}$",
        // present and recent weather
        r"^(?:RE)?(?:[-+]|VC)?(?:MI|PR|BC|DR|BL|SH|TS|FZ)?(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|BR|FG|FU|VA|DU|SA|HZ|PY|PO|SQ|FC|SS|DS)*$",
        r"^(?://|NSW)$",
        // cloud layers and sky condition
        r"^(?:FEW|SCT|BKN|OVC|VV|///)(?:\d{3}|///)(?:CB|TCU|///)?$",
        r"^(?:SKC|CLR|NSC|NCD|CAVOK)$",
        // runway visual range, runway state, wind shear
        r"^R\d{2}[LRC]?(?:/\S+)?$",
        r"^\d{8}$",
        r"^(?:WS|ALL|RWY)$",
        // sea state
        r"^WM?\d{2}/[SH]\S+$",
        // military colour states
        r"^(?:BLACK)?(?:BLU|WHT|GRN|YLO[12]?|AMB|RED)\+?$",
        r"^NOSIG$",
    ])
    .unwrap()
});

static VISIBILITY_FRACTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+SM$").unwrap());

static VISIBILITY_WHOLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$").unwrap());

/// Day, hour and minute from a `DDHHMMZ` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGroup {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Surface wind with speed already in metres per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindGroup {
    pub direction: Option<f64>,
    pub speed: Option<f64>,
}

/// Temperature and dew point in kelvin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureGroup {
    pub temp: Option<f64>,
    pub dewpt: Option<f64>,
}

/// Reason a group had the right shape but impossible values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    OutOfRange,
}

/// Parse a station identifier
pub fn parse_station(token: &str) -> Option<&str> {
    STATION_PATTERN.is_match(token).then_some(token)
}

/// Parse a `DDHHMMZ` time group
pub fn parse_time(token: &str) -> Option<Result<TimeGroup, GroupError>> {
    let caps = TIME_PATTERN.captures(token)?;
    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    let group = TimeGroup {
        day: field(1),
        hour: field(2),
        minute: field(3),
    };

    if group.day == 0 || group.day > 31 || group.hour > 23 || group.minute > 59 {
        return Some(Err(GroupError::OutOfRange));
    }
    Some(Ok(group))
}

/// Parse a surface wind group such as `27015G25KT`, `VRB03KT` or `09036KMH`
///
/// Speeds are converted to km/h from the reported unit and then to m/s.
/// Groups without a unit are not wind here; see [`parse_bare_wind`].
pub fn parse_wind(token: &str) -> Option<Result<WindGroup, GroupError>> {
    wind_group(token, true)
}

/// Parse a wind group that omits its unit, such as `27015`, as knots
///
/// Only meaningful for the first body group: elsewhere a bare number is more
/// likely another group than a wind.
pub fn parse_bare_wind(token: &str) -> Option<Result<WindGroup, GroupError>> {
    wind_group(token, false)
}

fn wind_group(token: &str, with_units: bool) -> Option<Result<WindGroup, GroupError>> {
    let caps = WIND_PATTERN.captures(token)?;
    if caps.name("units").is_some() != with_units {
        return None;
    }

    let direction = match &caps["dir"] {
        "VRB" | "///" => None,
        digits => {
            let degrees: f64 = digits.parse().ok()?;
            if degrees > 360.0 {
                return Some(Err(GroupError::OutOfRange));
            }
            Some(degrees)
        }
    };

    let kmh_per_unit = match caps.name("units").map(|m| m.as_str()) {
        Some("KMH") => 1.0,
        Some("MPS") => units::KMH_PER_MPS,
        _ => units::KMH_PER_KNOT,
    };

    let speed = match &caps["speed"] {
        "//" => None,
        digits => digits
            .parse::<f64>()
            .ok()
            .map(|value| units::kmh_to_mps(value * kmh_per_unit)),
    };

    Some(Ok(WindGroup { direction, speed }))
}

/// Parse a temperature / dew point group such as `12/M01`, `M05/` or `/////`
pub fn parse_temperature(token: &str) -> Option<TemperatureGroup> {
    let caps = TEMPERATURE_PATTERN.captures(token)?;

    let celsius = |sign: &str, value: &str| {
        caps.name(value).and_then(|m| m.as_str().parse::<f64>().ok()).map(|v| {
            let signed = if caps.name(sign).is_some() { -v } else { v };
            units::celsius_to_kelvin(signed)
        })
    };

    Some(TemperatureGroup {
        temp: celsius("tsign", "temp"),
        dewpt: celsius("dsign", "dewpt"),
    })
}

/// Parse a pressure group, `Qpppp` in hPa or `Apppp` in hundredths of inHg
///
/// Returns the pressure in pascals, `Some(None)` for a `////` placeholder.
pub fn parse_pressure(token: &str) -> Option<Option<f64>> {
    let caps = PRESSURE_PATTERN.captures(token)?;
    let raw = caps["value"].parse::<f64>().ok();

    let hpa = match &caps["unit"] {
        "A" => raw.map(|hundredths| units::inhg_to_hpa(hundredths / 100.0)),
        _ => raw,
    };

    Some(hpa.map(units::hpa_to_pa))
}

/// True for groups of the report body that are valid but not decoded
pub fn is_recognised_group(token: &str) -> bool {
    OTHER_GROUP_PATTERNS.is_match(token)
}

/// True for the whole-mile part of a split visibility such as `1 1/2SM`
pub fn is_split_visibility(whole: &str, fraction: &str) -> bool {
    VISIBILITY_WHOLE_PATTERN.is_match(whole) && VISIBILITY_FRACTION_PATTERN.is_match(fraction)
}
