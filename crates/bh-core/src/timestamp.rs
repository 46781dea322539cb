//! Timestamp normalization for session exports.
//!
//! Site exports are inconsistent about timestamp formats, so parsing is
//! permissive: RFC 3339 first, then the common naive layouts, taken as
//! UTC. Anything unparseable maps to None rather than an error; the
//! record stays in the table and only drops out of temporal comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts seen in the wild, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// Date-only layouts, normalized to midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a raw timestamp field into UTC.
///
/// Returns None for empty or unparseable values.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339() {
        let ts = parse_timestamp("2024-03-01T10:00:08+00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 8).unwrap());
    }

    #[test]
    fn test_rfc3339_with_offset_normalizes_to_utc() {
        let ts = parse_timestamp("2024-03-01T12:00:08+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 8).unwrap());
    }

    #[test]
    fn test_naive_datetime_taken_as_utc() {
        let ts = parse_timestamp("2024-03-01 10:00:08").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 8).unwrap());
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = parse_timestamp("2024-03-01 10:00:08.500").unwrap();
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 8).unwrap();
        assert_eq!((ts - base).num_milliseconds(), 500);
    }

    #[test]
    fn test_date_only_is_midnight() {
        let ts = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unparseable_maps_to_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("not a timestamp"), None);
        assert_eq!(parse_timestamp("2024-13-45 99:99:99"), None);
    }
}
