//! Database access layer for lexi-dict
//!
//! Every function takes a `&mut SqliteConnection`, so the same call works on
//! a pooled connection or inside a transaction (`&mut *tx`).

pub mod hints;
pub mod languages;
pub mod translations;
pub mod users;
pub mod words;

use lexi_common::{Error, Result};
use uuid::Uuid;

/// Parse a GUID column value
pub(crate) fn parse_guid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Internal(format!("Invalid GUID '{}': {}", value, e)))
}

/// Whether a storage error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &Error) -> bool {
    match err {
        Error::Database(e) => e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation()),
        _ => false,
    }
}
