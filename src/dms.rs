//! Degrees-minutes-seconds text handling: a lenient parser for the many
//! ways humans write angles, and fixed-width formatters for rendering them
//! back, including hemisphere, bearing and compass-point helpers.

use crate::angular::normalize_bearing;
use crate::Error;

/// Output format for [`to_dms`] and friends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DmsFormat {
    /// `DDD.dddd°`
    Degrees,
    /// `DDD° MM.mm'`
    DegreesMinutes,
    /// `DDD° MM' SS.ss"`
    DegreesMinutesSeconds,
}

// A numeric field with possible trailing junk ("46\"", "12,"): drop
// characters from the end until the remainder parses, or give up with 0.
fn cast_to_double(field: &str) -> f64 {
    let mut field = field;
    loop {
        if let Ok(value) = field.parse::<f64>() {
            return value;
        }
        let mut chars = field.chars();
        if chars.next_back().is_none() {
            return 0.0;
        }
        field = chars.as_str();
    }
}

// Runs of digits, dots and commas; everything else separates
fn numeric_groups(text: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        let numeric = c.is_ascii_digit() || c == '.' || c == ',';
        match (start, numeric) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                groups.push(&text[s..i]);
                start = None;
            }
            _ => (),
        }
    }
    if let Some(s) = start {
        groups.push(&text[s..]);
    }
    groups
}

/// Parse degrees-minutes-seconds text into decimal degrees.
///
/// Accepts a plain decimal number, or a string carrying 1-3 numeric groups
/// (degrees, minutes, seconds) in any common punctuation, with an optional
/// leading sign or trailing hemisphere letter; `S` and `W` negate.
///
/// ```
/// # use gridref::parse_dms;
/// # fn main() -> anyhow::Result<()> {
/// assert!((parse_dms("40°26'46\"N")? - 40.446_111).abs() < 1e-6);
/// assert_eq!(parse_dms("-79.982")?, -79.982);
/// assert_eq!(parse_dms("79.982W")?, -79.982);
/// # Ok(())
/// # }
/// ```
pub fn parse_dms(text: &str) -> Result<f64, Error> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(value);
    }

    let negative = trimmed.starts_with('-') || trimmed.ends_with(['S', 'W', 's', 'w']);

    // Strip the sign and hemisphere markers before grouping
    let mut body = trimmed.strip_prefix('-').unwrap_or(trimmed).trim_start();
    if body.ends_with(['N', 'S', 'E', 'W', 'n', 's', 'e', 'w']) {
        let mut chars = body.chars();
        chars.next_back();
        body = chars.as_str().trim_end();
    }

    let groups = numeric_groups(body);
    let degrees = match groups.len() {
        1 => cast_to_double(groups[0]),
        2 => cast_to_double(groups[0]) + cast_to_double(groups[1]) / 60.0,
        3 => {
            cast_to_double(groups[0])
                + cast_to_double(groups[1]) / 60.0
                + cast_to_double(groups[2]) / 3600.0
        }
        0 => return Err(Error::ParseError("no numeric degree group found")),
        _ => return Err(Error::ParseError("more than three numeric groups")),
    };

    if negative {
        return Ok(-degrees);
    }
    Ok(degrees)
}

/// Format decimal degrees as an unsigned, zero-padded DMS string (three
/// degree digits). Seconds and minutes that round up to 60 carry over.
pub fn to_dms(deg: f64, format: DmsFormat, decimal_places: u32) -> String {
    let degrees = deg.abs();
    let dp = decimal_places as usize;
    let rounding = 10_f64.powi(decimal_places as i32);

    match format {
        DmsFormat::Degrees => {
            // Three integer digits plus the decimals and their point
            let width = if dp > 0 { dp + 4 } else { 3 };
            format!("{degrees:0width$.dp$}°")
        }
        DmsFormat::DegreesMinutes => {
            let mut d = degrees.trunc() as i64;
            let mut m = (degrees * 60.0) % 60.0;
            m = (m * rounding).round() / rounding;
            if m == 60.0 {
                d += 1;
                m = 0.0;
            }
            let width = if dp > 0 { dp + 3 } else { 2 };
            format!("{d:03}° {m:0width$.dp$}'")
        }
        DmsFormat::DegreesMinutesSeconds => {
            let mut d = degrees.trunc() as i64;
            let mut m = ((degrees * 3600.0 / 60.0) % 60.0).trunc() as i64;
            let mut s = (degrees * 3600.0) % 60.0;
            s = (s * rounding).round() / rounding;
            if s == 60.0 {
                s = 0.0;
                m += 1;
            }
            if m == 60 {
                m = 0;
                d += 1;
            }
            let width = if dp > 0 { dp + 3 } else { 2 };
            format!("{d:03}° {m:02}' {s:0width$.dp$}\"")
        }
    }
}

/// A latitude with its hemisphere letter; two degree digits suffice
pub fn to_lat(deg: f64, format: DmsFormat, decimal_places: u32) -> String {
    let hemisphere = if deg < 0.0 { 'S' } else { 'N' };
    let dms = to_dms(deg, format, decimal_places);
    format!("{} {}", &dms[1..], hemisphere)
}

/// A longitude with its hemisphere letter
pub fn to_lon(deg: f64, format: DmsFormat, decimal_places: u32) -> String {
    let hemisphere = if deg < 0.0 { 'W' } else { 'E' };
    format!("{} {}", to_dms(deg, format, decimal_places), hemisphere)
}

/// A bearing, normalized to [0°, 360°). North that rounds up to 360 is
/// rendered as 0.
pub fn to_brng(deg: f64, format: DmsFormat, decimal_places: u32) -> String {
    let bearing = to_dms(normalize_bearing(deg), format, decimal_places);
    bearing.replace("360", "0")
}

#[rustfmt::skip]
const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE",
    "E", "ESE", "SE", "SSE",
    "S", "SSW", "SW", "WSW",
    "W", "WNW", "NW", "NNW",
];

/// The compass point nearest to a bearing: precision 1 gives the 4
/// cardinals, 2 the 8 intercardinals, 3 all 16 points.
pub fn compass_point(bearing: f64, precision: u32) -> &'static str {
    let bearing = normalize_bearing(bearing);
    let n = 4.0 * 2_f64.powi(precision as i32 - 1);
    let idx = ((bearing * n / 360.0).round() % n * 16.0 / n) as usize;
    CARDINALS[idx % 16]
}

// ----- T E S T S ---------------------------------------------------------------------
