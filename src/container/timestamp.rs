use chrono::{DateTime, Datelike, Utc};

use super::{Error, Result};

/// Parses a runtime state timestamp such as `2024-05-01T12:30:45.123456789Z`.
///
/// The full sub-second precision and the timezone offset are kept; the result is
/// normalized to UTC.
///
/// Returns `Ok(None)` for timestamps that denote "never happened": the empty string
/// and the runtime's zero value `0001-01-01T00:00:00Z`.
///
/// # Errors
///
/// Returns [`Error::TimestampParseFailed`] if the value is not valid RFC 3339.
///
/// # Examples
///
/// ```
/// # use container_exporter::container::parse_timestamp;
/// assert!(parse_timestamp("0001-01-01T00:00:00Z").unwrap().is_none());
/// let ts = parse_timestamp("2024-05-01T12:30:45.5+02:00").unwrap().unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-05-01T10:30:45.500+00:00");
/// ```
pub fn parse_timestamp(value: &str) -> Result<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let parsed =
        DateTime::parse_from_rfc3339(value).map_err(|source| Error::TimestampParseFailed {
            value: value.to_owned(),
            source,
        })?;
    let parsed = parsed.with_timezone(&Utc);

    // Zero value of the runtime's time type.
    if parsed.year() <= 1 {
        return Ok(None);
    }

    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_nanosecond_precision() {
        let ts = parse_timestamp("2024-05-01T12:30:45.123456789Z")
            .unwrap()
            .unwrap();
        assert_eq!(ts.timestamp(), 1_714_566_645);
        assert_eq!(ts.nanosecond(), 123_456_789);
    }

    #[test]
    fn test_parse_offset_is_normalized() {
        let ts = parse_timestamp("2024-05-01T14:30:45+02:00").unwrap().unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap());
    }

    #[test]
    fn test_zero_value_is_none() {
        assert_eq!(parse_timestamp("0001-01-01T00:00:00Z").unwrap(), None);
        assert_eq!(parse_timestamp("").unwrap(), None);
        assert_eq!(parse_timestamp("   ").unwrap(), None);
    }

    #[test]
    fn test_malformed_timestamp() {
        let err = parse_timestamp("yesterday").unwrap_err();
        match err {
            Error::TimestampParseFailed { value, .. } => assert_eq!(value, "yesterday"),
            _ => panic!("Expected TimestampParseFailed error"),
        }
    }

    #[test]
    fn test_truncated_timestamp_is_rejected() {
        // No timezone component.
        assert!(parse_timestamp("2024-05-01T12:30:45").is_err());
    }
}
