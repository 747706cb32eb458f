//! Duration strings such as `500ms`, `30s`, `1m30s` or `1.5h`.
//!
//! The same grammar is accepted by the `--timeout` flag and by the
//! `timeout:` key of the config document. A bare `0` means "no timeout".

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{DoctorError, Result};

/// Unit suffixes and their length in nanoseconds.
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

/// Parse a duration string made of one or more `<number><unit>` terms.
///
/// # Examples
///
/// ```
/// use doctor::config::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
/// assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = |message: &str| DoctorError::InvalidDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty duration"));
    }
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    let mut rest = trimmed;
    let mut total_nanos = 0.0_f64;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| invalid("malformed number"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| {
                if unit.is_empty() {
                    invalid("missing unit (use ns, us, ms, s, m or h)")
                } else {
                    invalid(&format!("unknown unit '{}'", unit))
                }
            })?;
        rest = &rest[unit_len..];

        total_nanos += (value * scale).round();
    }

    if total_nanos > u64::MAX as f64 {
        return Err(invalid("out of range"));
    }
    Ok(Duration::from_nanos(total_nanos as u64))
}

/// Adapter for clap's `value_parser`.
pub fn parse_duration_arg(input: &str) -> std::result::Result<Duration, String> {
    parse_duration(input).map_err(|e| e.to_string())
}

/// Format a duration compactly: `0s`, `500ns`, `750ms`, `2s`, `1m30s`, `1h0m5.5s`.
pub fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return "0s".to_string();
    }
    if d < Duration::from_micros(1) {
        return format!("{}ns", d.as_nanos());
    }
    if d < Duration::from_millis(1) {
        return format!("{}µs", d.as_micros());
    }
    if d < Duration::from_secs(1) {
        return format!("{}ms", d.as_millis());
    }

    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    let millis = d.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    if millis == 0 {
        let _ = write!(out, "{}s", seconds);
    } else {
        let fraction = format!("{:03}", millis);
        let _ = write!(out, "{}.{}s", seconds, fraction.trim_end_matches('0'));
    }
    out
}

/// Serde helper for optional duration fields.
///
/// Accepts a duration string or a plain integer number of seconds.
pub fn deserialize_optional<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Seconds(secs)) => Ok(Some(Duration::from_secs(secs))),
        Some(Raw::Text(text)) => parse_duration(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
    }

    #[test]
    fn parses_compound_and_fractional() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("0.25s").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn zero_is_allowed_without_unit() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_missing_unit() {
        let err = parse_duration("30").unwrap_err();
        assert!(err.to_string().contains("missing unit"));
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = parse_duration("3d").unwrap_err();
        assert!(err.to_string().contains("unknown unit 'd'"));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("1..2s").is_err());
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_millis(750)), "750ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_millis(3_605_500)), "1h0m5.5s");
        assert_eq!(format_duration(Duration::from_micros(12)), "12µs");
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
    }

    #[test]
    fn format_then_parse_is_stable() {
        let d = Duration::from_millis(61_250);
        assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
    }

    #[test]
    fn arg_parser_reports_message() {
        let err = parse_duration_arg("soon").unwrap_err();
        assert!(err.contains("soon"));
    }
}
