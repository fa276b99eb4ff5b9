//! Timestamp formatting utilities
//!
//! Records carry `DateTime<Utc>`; every wire format renders it as ISO 8601
//! with millisecond precision: `2025-01-08T10:30:45.123Z`.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp in the wire form
pub fn format_iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 / ISO 8601 timestamp, normalizing to UTC
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter writing timestamps in the wire form
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso8601(timestamp))
    }
}
