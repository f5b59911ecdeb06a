//! Timestamp helpers
//!
//! All timestamps are stored as fixed-width RFC 3339 UTC strings with
//! microsecond precision, so lexicographic order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Current time as a storage-format timestamp string
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format an arbitrary instant in the storage format
pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a storage-format timestamp back into a `DateTime<Utc>`
pub fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Failed to parse timestamp '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let now = now_rfc3339();
        let parsed = parse_rfc3339(&now).unwrap();
        assert_eq!(to_rfc3339(parsed), now);
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let earlier = to_rfc3339(Utc::now());
        let later = to_rfc3339(Utc::now() + chrono::Duration::milliseconds(5));
        assert!(earlier < later);
    }

    #[test]
    fn test_fixed_width() {
        // Microsecond precision keeps every timestamp the same length
        let a = now_rfc3339();
        let b = to_rfc3339(parse_rfc3339("2026-01-01T00:00:00Z").unwrap());
        assert_eq!(a.len(), b.len());
    }
}
