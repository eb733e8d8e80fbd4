//! Time handling for build records and query thresholds.
//!
//! The metadata store keeps the last successful build time as
//! `t<fractional days since the Unix epoch>s`, e.g. `t19797.5s`. Queries
//! compare against `DateTime<Utc>`, so every stored value is normalized here
//! before any comparison happens.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Normalize a stored time cell. Empty cells and `NA` mean the target has no
/// timestamp.
pub fn parse_stored_time(raw: &str) -> Result<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return Ok(None);
    }

    if let Some(days) = raw.strip_prefix('t').and_then(|rest| rest.strip_suffix('s')) {
        let days: f64 = days
            .parse()
            .map_err(|_| Error::InvalidTime(raw.to_string()))?;
        if !days.is_finite() {
            return Err(Error::InvalidTime(raw.to_string()));
        }
        return from_epoch_micros((days * MICROS_PER_DAY).round() as i64)
            .map(Some)
            .ok_or_else(|| Error::InvalidTime(raw.to_string()));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|_| Error::InvalidTime(raw.to_string()))
}

/// Inverse of [`parse_stored_time`] for timestamped records.
pub fn format_stored_time(time: DateTime<Utc>) -> String {
    let days = time.timestamp_micros() as f64 / MICROS_PER_DAY;
    format!("t{}s", days)
}

fn from_epoch_micros(micros: i64) -> Option<DateTime<Utc>> {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Parse a single user-supplied instant.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`; the last two are
/// read as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(t) = d.and_hms_opt(0, 0, 0) {
            return Ok(t.and_utc());
        }
    }

    Err(Error::Validation(format!(
        "threshold must be a well-formed instant, got {:?}",
        raw
    )))
}

/// Validate that exactly one threshold was supplied and parse it.
pub fn parse_threshold(values: &[&str]) -> Result<DateTime<Utc>> {
    match values {
        [single] => parse_instant(single),
        _ => Err(Error::Validation(format!(
            "threshold must be exactly one instant, got {} values",
            values.len()
        ))),
    }
}

/// Validate that exactly one inclusivity flag was supplied and parse it.
pub fn parse_inclusive(values: &[&str]) -> Result<bool> {
    let [single] = values else {
        return Err(Error::Validation(format!(
            "inclusive must be exactly one boolean, got {} values",
            values.len()
        )));
    };

    match single.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::Validation(format!(
            "inclusive must be true or false, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stored_days_format() {
        let t = parse_stored_time("t1s").unwrap().unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap());

        let t = parse_stored_time("t19797.5s").unwrap().unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_stored_time_absent() {
        assert_eq!(parse_stored_time("").unwrap(), None);
        assert_eq!(parse_stored_time("NA").unwrap(), None);
        assert_eq!(parse_stored_time("  ").unwrap(), None);
    }

    #[test]
    fn test_stored_time_rfc3339() {
        let t = parse_stored_time("2024-03-15T12:00:00+02:00").unwrap().unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_stored_time_garbage() {
        assert!(matches!(parse_stored_time("tabcs"), Err(Error::InvalidTime(_))));
        assert!(matches!(parse_stored_time("yesterday"), Err(Error::InvalidTime(_))));
    }

    #[test]
    fn test_format_roundtrip_keeps_micros() {
        let t = Utc.with_ymd_and_hms(2023, 11, 2, 8, 30, 15).unwrap()
            + chrono::Duration::microseconds(250);
        let stored = format_stored_time(t);
        assert!(stored.starts_with('t') && stored.ends_with('s'));
        assert_eq!(parse_stored_time(&stored).unwrap(), Some(t));
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_instant("2024-01-02T03:04:05Z").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-02 03:04:05").unwrap(), expected);
        assert_eq!(
            parse_instant("2024-01-02").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert!(matches!(parse_instant("soon"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_threshold_must_be_single() {
        assert!(parse_threshold(&["2024-01-01"]).is_ok());
        assert!(matches!(parse_threshold(&[]), Err(Error::Validation(_))));
        assert!(matches!(
            parse_threshold(&["2024-01-01", "2024-01-02"]),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_inclusive_must_be_single_boolean() {
        assert!(parse_inclusive(&["TRUE"]).unwrap());
        assert!(!parse_inclusive(&["false"]).unwrap());
        assert!(matches!(parse_inclusive(&["yes"]), Err(Error::Validation(_))));
        assert!(matches!(parse_inclusive(&["true", "false"]), Err(Error::Validation(_))));
        assert!(matches!(parse_inclusive(&[]), Err(Error::Validation(_))));
    }
}
