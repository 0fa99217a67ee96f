//! Expiry timestamp parsing.

use chrono::{DateTime, NaiveDateTime, Utc};

const SIMPLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an expiry argument as RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
///
/// The simple form carries no offset and is interpreted as UTC, matching
/// the container's on-disk timestamp.
pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, SIMPLE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("expected RFC 3339 or \"YYYY-MM-DD HH:MM:SS\" (UTC), got {text:?}"))
}
