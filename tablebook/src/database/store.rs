//! The `SQLite` implementation of the storage traits.
//!
//! The trait impls live in `customers.rs`, `tables.rs` and
//! `reservations.rs`; this module holds the store type and the value
//! conversions they share.

use chrono::{DateTime, NaiveDateTime};

use crate::error::Error;
use crate::slot::BookingSlot;

use super::schema::CONFLICT_MESSAGE;

/// Storage backed by the tables created in `schema.rs`.
///
/// Stateless: every method runs on the connection or transaction it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteStore;

/// Converts a timestamp to epoch seconds for storage.
pub(super) fn datetime_to_secs(at: NaiveDateTime) -> i64 {
    at.and_utc().timestamp()
}

/// Converts stored epoch seconds back to a timestamp.
pub(super) fn secs_to_datetime(secs: i64) -> rusqlite::Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, secs))
}

/// Wraps a domain conversion failure so it can leave a row-mapping closure.
pub(super) fn conversion_error<E>(err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
}

/// Returns `true` if `err` is the overlap trigger firing.
pub(super) fn is_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.contains(CONFLICT_MESSAGE)
    )
}

/// Maps the overlap trigger to [`Error::TableUnavailable`], anything else to storage.
pub(super) fn map_conflict(err: rusqlite::Error, table_id: i64, slot: &BookingSlot) -> Error {
    if is_conflict(&err) {
        Error::TableUnavailable {
            table_id: Some(table_id),
            date: slot.date(),
            time: slot.time(),
        }
    } else {
        Error::Storage(err)
    }
}

/// Returns `true` if `err` is a UNIQUE constraint violation.
pub(super) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
