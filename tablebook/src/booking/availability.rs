//! The per-table conflict window.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::slot::BookingSlot;
use crate::store::ReservationStore;

/// Answers "is this table free at this slot?".
///
/// A table is busy when another awaiting or confirmed reservation on the
/// same table and date starts strictly less than two hours away. A storage
/// failure is reported as [`Error::AvailabilityCheckFailed`], never as "busy".
#[derive(Debug)]
pub struct ConflictChecker<'a, S: ReservationStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ReservationStore + ?Sized> ConflictChecker<'a, S> {
    /// Creates a checker over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns `true` if `table_id` is free at `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AvailabilityCheckFailed`] if the lookup fails.
    pub fn is_table_available(
        &self,
        conn: &Connection,
        table_id: i64,
        slot: &BookingSlot,
    ) -> Result<bool> {
        self.is_table_available_excluding(conn, table_id, slot, None)
    }

    /// Like [`Self::is_table_available`], ignoring reservation `exclude`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AvailabilityCheckFailed`] if the lookup fails.
    pub fn is_table_available_excluding(
        &self,
        conn: &Connection,
        table_id: i64,
        slot: &BookingSlot,
        exclude: Option<i64>,
    ) -> Result<bool> {
        self.store
            .is_table_available(conn, table_id, slot, exclude)
            .map_err(|source| Error::AvailabilityCheckFailed {
                table_id,
                source: Box::new(source),
            })
    }
}
