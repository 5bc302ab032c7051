//! Domain models for the clinic.

mod medicine;
mod patient;
mod visit;

pub use medicine::*;
pub use patient::*;
pub use visit::*;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Stored timestamp form: UTC, millisecond precision, `Z` suffix.
///
/// Fixed width, so text order in SQLite is chronological order.
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current time in stored form.
pub fn timestamp_now() -> String {
    format_utc(Utc::now())
}

/// Parse an RFC 3339 timestamp with any offset into stored form.
pub fn to_utc_timestamp(raw: &str) -> Result<String, chrono::ParseError> {
    let ts = DateTime::parse_from_rfc3339(raw.trim())?;
    Ok(format_utc(ts.with_timezone(&Utc)))
}

/// Calendar day of a timestamp on a clock `utc_offset_minutes` ahead of UTC.
pub fn local_day(raw: &str, utc_offset_minutes: i32) -> Option<NaiveDate> {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60)?;
    let ts = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    Some(ts.with_timezone(&offset).date_naive())
}
