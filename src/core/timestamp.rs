// LogWeave - core/timestamp.rs
//
// Leading-token extraction and ISO-8601 timestamp parsing.
// Core layer: operates on byte slices, never touches the filesystem.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Outcome of inspecting the start of a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadingTimestamp<'a> {
    /// The line is empty or whitespace only; it has no token at all.
    Blank,
    /// The leading token parsed as an ISO-8601 instant.
    Parsed(DateTime<Utc>),
    /// The leading token is not a recognisable ISO-8601 timestamp.
    Malformed(&'a [u8]),
}

/// Inspect `raw` (one line, terminator optional) and parse its leading token.
///
/// The leading token is the first run of non-whitespace bytes, skipping any
/// indentation. A token that is not valid UTF-8 is reported as malformed.
pub fn read_leading_timestamp(raw: &[u8]) -> LeadingTimestamp<'_> {
    let Some(token) = leading_token(raw) else {
        return LeadingTimestamp::Blank;
    };

    match std::str::from_utf8(token).ok().and_then(parse_iso8601) {
        Some(ts) => LeadingTimestamp::Parsed(ts),
        None => LeadingTimestamp::Malformed(token),
    }
}

/// First whitespace-delimited token of `raw`, if any.
pub fn leading_token(raw: &[u8]) -> Option<&[u8]> {
    raw.split(|b| b.is_ascii_whitespace()).find(|t| !t.is_empty())
}

/// Parse an ISO-8601 timestamp token into a UTC instant.
///
/// Strategy, most specific first:
///   1. RFC 3339 (`2023-01-01T00:00:00.123Z`, `...+05:30`).
///   2. Comma decimal separator (`2023-01-01T00:00:00,123Z`) is normalised to
///      a dot and the RFC 3339 parse retried.
///   3. Offsets RFC 3339 refuses: basic format without colon
///      (`...00:00:00.123+0530`) and hour-only (`...00:00:00+05`).
///   4. No offset at all (`2023-01-01T00:00:00[.fff]`), taken as UTC.
///   5. Date only (`2023-01-01`), taken as midnight UTC.
///
/// Fractional seconds are kept at full (nanosecond) precision.
///
/// Timestamps without an offset are read as UTC, not as the host's local
/// time. ISO 8601 itself would call them local time; reading them as UTC keeps
/// the merged order independent of the machine's time zone. Two files written
/// in different zones without offsets will therefore be compared by wall
/// clock.
pub fn parse_iso8601(token: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.with_timezone(&Utc));
    }

    let normalised = token.replacen(',', ".", 1);
    if normalised != token {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    if let Ok(dt) = DateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S"))
    {
        return Some(ndt.and_utc());
    }

    NaiveDate::parse_from_str(&normalised, "%Y-%m-%d")
        .ok()
        .and_then(|nd| nd.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}
