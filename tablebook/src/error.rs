//! Error types for the tablebook library.
//!
//! This module provides the error hierarchy for all booking operations,
//! using `thiserror` for ergonomic error handling. Business-rule refusals
//! (a table being busy, an illegal status change) are ordinary variants
//! the caller is expected to react to; storage failures are kept apart so
//! an upstream caller can decide whether to retry.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::reservation::ReservationStatus;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// Looking up or creating the customer record failed.
    #[error("customer lookup failed for phone {phone}: {source}")]
    CustomerLookupFailed {
        /// The phone number being resolved.
        phone: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The conflict check for a table could not be completed.
    #[error("availability check failed for table {table_id}: {source}")]
    AvailabilityCheckFailed {
        /// The table being checked.
        table_id: i64,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested table does not exist.
    #[error("table not found: {table_id}")]
    TableNotFound {
        /// The missing table id.
        table_id: i64,
    },

    /// The table (or every candidate table) is booked within the conflict window.
    #[error(
        "table is not available at selected time ({date} {}){}",
        time.format("%H:%M"),
        table_id.map(|id| format!(" for table {id}")).unwrap_or_default()
    )]
    TableUnavailable {
        /// The specific table, when one was requested.
        table_id: Option<i64>,
        /// The requested date.
        date: NaiveDate,
        /// The requested time of day.
        time: NaiveTime,
    },

    /// No table is large enough for the party.
    #[error("no tables available with sufficient capacity for {pax} guests")]
    InsufficientCapacity {
        /// The party size that could not be seated.
        pax: u8,
    },

    /// The reservation does not exist.
    #[error("reservation not found: {id}")]
    ReservationNotFound {
        /// The missing reservation id.
        id: i64,
    },

    /// The requested slot is too close to now (or already past).
    #[error("reservation time must be at least 1 hour from now (requested {requested}, earliest {earliest})")]
    InvalidReservationTime {
        /// The requested start of the reservation.
        requested: NaiveDateTime,
        /// The earliest start that would have been accepted.
        earliest: NaiveDateTime,
    },

    /// The date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date format '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat {
        /// The rejected input.
        value: String,
    },

    /// The time is not a 24-hour `HH:MM` time.
    #[error("invalid time format '{value}': expected HH:MM")]
    InvalidTimeFormat {
        /// The rejected input.
        value: String,
    },

    /// The status string is not one of the known reservation statuses.
    #[error("invalid status '{value}': expected one of awaiting, confirmed, cancelled, completed")]
    InvalidStatus {
        /// The rejected input.
        value: String,
    },

    /// The requested status change is not an edge of the lifecycle.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: ReservationStatus,
        /// The requested target (a status, or `checked_in`).
        to: String,
    },

    /// A field-level input validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A storage error occurred.
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns `true` for the expected business-rule outcomes.
    ///
    /// These are refusals the caller must react to (offer another slot,
    /// fix the input); they are never worth retrying unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Error;
    ///
    /// let err = Error::TableNotFound { table_id: 7 };
    /// assert!(err.is_business_rule());
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::CustomerLookupFailed { .. }
                | Self::AvailabilityCheckFailed { .. }
                | Self::TableNotFound { .. }
                | Self::TableUnavailable { .. }
                | Self::InsufficientCapacity { .. }
                | Self::ReservationNotFound { .. }
                | Self::InvalidReservationTime { .. }
                | Self::InvalidDateFormat { .. }
                | Self::InvalidTimeFormat { .. }
                | Self::InvalidStatus { .. }
                | Self::InvalidStatusTransition { .. }
                | Self::Validation { .. }
        )
    }

    /// Returns `true` if the error is transient and an upstream caller may retry.
    ///
    /// Only storage failures and lock timeouts qualify. The library itself
    /// never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::LockTimeout { .. })
    }

    /// Returns `true` if the error reports a missing table or reservation.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound { .. } | Self::ReservationNotFound { .. }
        )
    }
}
