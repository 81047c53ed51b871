//! Canonical textual timestamp format
//!
//! RFC 3339 in UTC with nanosecond precision and a `Z` suffix. Every stored
//! timestamp uses this format, so formatting then parsing is lossless.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::{Result, SnacError};

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored timestamp
///
/// # Errors
///
/// Returns `TimestampParse` when `value` is not RFC 3339. A bad value is never
/// replaced by a default.
pub fn parse(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| SnacError::TimestampParse {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
