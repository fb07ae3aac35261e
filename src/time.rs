//! Conversion between the IS compact timestamp format and local instants.
//!
//! The IS exchanges timestamps as `YYYYMMDDHHMMSS` in the server's local
//! time, with no zone designator.

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

use crate::error::{IsApiError, Result};

const WIRE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Parse a compact wire timestamp as a local instant.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Local>> {
    let raw = raw.trim();
    if raw.len() != 14 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IsApiError::InvalidTimestamp(raw.to_string()));
    }
    let naive = NaiveDateTime::parse_from_str(raw, WIRE_FORMAT)
        .map_err(|_| IsApiError::InvalidTimestamp(raw.to_string()))?;

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(IsApiError::InvalidTimestamp(format!(
            "{} does not exist in local time",
            raw
        ))),
    }
}

/// Render an instant in the compact wire format, in local time.
pub fn format_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Local).format(WIRE_FORMAT).to_string()
}
