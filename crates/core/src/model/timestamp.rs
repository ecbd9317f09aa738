use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a service timestamp.
///
/// RFC 3339 values are converted to UTC. Values without an offset are read
/// as UTC. Anything else yields `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper for optional timestamps that never fails on the
/// value itself.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => parse_timestamp(&raw),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_timestamp_is_converted_to_utc() {
        let parsed = parse_timestamp("2024-03-01T08:00:00+08:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn naive_timestamp_is_read_as_utc() {
        let parsed = parse_timestamp("2024-03-01T08:00:00.123456").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T08:00:00.123456+00:00");

        let parsed = parse_timestamp("2024-03-01 08:01:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T08:01:00+00:00");
    }

    #[test]
    fn unparsable_timestamp_is_none() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
