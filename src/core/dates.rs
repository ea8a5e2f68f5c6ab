//! Timestamp parsing for case and answer dates
//!
//! The data layer hands out dates either as epoch-millisecond strings (the
//! default serialization of its date scalar) or as ISO strings. Both are
//! accepted here; anything else is a typed error so callers can decide how to
//! degrade.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::errors::DataError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Milliseconds in one day
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Parse a timestamp string into UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DataError> {
    let value = raw.trim();
    let invalid = || DataError::InvalidTimestamp {
        value: raw.to_string(),
    };

    if value.is_empty() {
        return Err(invalid());
    }

    if is_epoch_millis(value) {
        let millis: i64 = value.parse().map_err(|_| invalid())?;
        return from_millis(millis).ok_or_else(invalid);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(invalid)
}

/// Parse a JSON date value, which may be a string or a millisecond number
pub fn parse_timestamp_value(value: &Value) -> Result<DateTime<Utc>, DataError> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(from_millis)
            .ok_or_else(|| DataError::InvalidTimestamp {
                value: n.to_string(),
            }),
        other => Err(DataError::InvalidTimestamp {
            value: other.to_string(),
        }),
    }
}

/// Elapsed days between two instants, as a float
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

fn is_epoch_millis(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
