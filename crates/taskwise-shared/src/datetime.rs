use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a backend timestamp. The API is not consistent about offsets: it
/// emits RFC3339 with `+00:00`, a bare `Z` suffix, or naive ISO without any
/// offset (always UTC). All three must decode.
pub fn parse_wire_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

pub fn to_wire_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_wire_timestamp("2024-01-01T10:00:00+00:00").expect("parse");
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn parses_z_suffix() {
        let parsed = parse_wire_timestamp("2024-06-15T08:30:00Z").expect("parse");
        assert_eq!((parsed.month(), parsed.day()), (6, 15));
    }

    #[test]
    fn parses_naive_iso() {
        let parsed = parse_wire_timestamp("2024-01-01T10:00:00").expect("parse");
        assert_eq!(parsed.hour(), 10);

        let short = parse_wire_timestamp("2024-01-01T10:00").expect("parse");
        assert_eq!(short.minute(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_wire_timestamp("").is_none());
        assert!(parse_wire_timestamp("not a date").is_none());
    }

    #[test]
    fn wire_roundtrip() {
        let now = Utc::now();
        let parsed = parse_wire_timestamp(&to_wire_timestamp(now)).expect("parse");
        assert_eq!(parsed.timestamp(), now.timestamp());
    }
}
