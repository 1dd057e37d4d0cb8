//! Timestamp utilities
//!
//! Timestamps are stored as RFC 3339 UTC text with a fixed number of
//! fractional digits so that lexical order equals chronological order.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};

use crate::{Error, Result};

/// Get current UTC timestamp, truncated to the stored microsecond precision
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_subsec_micros();
    now.with_nanosecond(micros * 1_000).unwrap_or(now)
}

/// Format a timestamp for storage
pub fn to_db_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub fn from_db_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid timestamp '{}': {}", value, e)))
}
