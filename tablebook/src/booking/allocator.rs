//! Table allocation with capacity and conflict-window checks.
//!
//! This module implements table selection for a booking: either the table
//! the guest asked for, verified, or the smallest free table that seats the
//! party.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::reservation::PartySize;
use crate::slot::BookingSlot;
use crate::store::{ReservationStore, TableStore};
use crate::table::Table;

use super::availability::ConflictChecker;

/// What to allocate a table for.
///
/// # Examples
///
/// ```
/// use tablebook::booking::AllocationRequest;
/// use tablebook::{BookingSlot, PartySize};
///
/// let pax = PartySize::try_from(4u32).unwrap();
/// let slot = BookingSlot::parse("2025-06-01", "19:00").unwrap();
///
/// let auto = AllocationRequest::new(pax, slot);
/// assert_eq!(auto.table_id, None);
///
/// let explicit = AllocationRequest::new(pax, slot).with_table(Some(3));
/// assert_eq!(explicit.table_id, Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Party size to seat.
    pub pax: PartySize,
    /// Slot to seat them at.
    pub slot: BookingSlot,
    /// A specific table; `None` lets the allocator choose.
    pub table_id: Option<i64>,
    /// A reservation to ignore in the conflict check (the one being moved).
    pub exclude: Option<i64>,
}

impl AllocationRequest {
    /// An auto-select request.
    #[must_use]
    pub const fn new(pax: PartySize, slot: BookingSlot) -> Self {
        Self {
            pax,
            slot,
            table_id: None,
            exclude: None,
        }
    }

    /// Asks for a specific table, or auto-select for `None`.
    #[must_use]
    pub const fn with_table(mut self, table_id: Option<i64>) -> Self {
        self.table_id = table_id;
        self
    }

    /// Ignores reservation `id` in the conflict check.
    #[must_use]
    pub const fn excluding(mut self, id: i64) -> Self {
        self.exclude = Some(id);
        self
    }
}

/// Result of a table allocation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// A table was found.
    Allocated(Table),
    /// The requested table does not exist.
    TableNotFound {
        /// The missing table.
        table_id: i64,
    },
    /// The requested table, or every candidate, is booked within the window.
    Unavailable {
        /// The requested table; `None` when auto-selecting.
        table_id: Option<i64>,
    },
    /// The requested table is too small for the party.
    InsufficientCapacity {
        /// The requested table.
        table_id: i64,
    },
    /// No table at all seats the party.
    NoCandidates,
}

impl AllocationOutcome {
    /// Returns `true` if a table was found.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated(_))
    }

    /// Converts the outcome to the allocated table or its typed error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`], [`Error::TableUnavailable`] or
    /// [`Error::InsufficientCapacity`] for the corresponding refusals.
    pub fn into_result(self, request: &AllocationRequest) -> Result<Table> {
        match self {
            Self::Allocated(table) => Ok(table),
            Self::TableNotFound { table_id } => Err(Error::TableNotFound { table_id }),
            Self::Unavailable { table_id } => Err(Error::TableUnavailable {
                table_id,
                date: request.slot.date(),
                time: request.slot.time(),
            }),
            Self::InsufficientCapacity { .. } | Self::NoCandidates => {
                Err(Error::InsufficientCapacity {
                    pax: request.pax.value(),
                })
            }
        }
    }
}

/// Stateless table allocator.
///
/// All state comes from the store and the connection it is handed; the same
/// allocator can serve any number of units of work.
#[derive(Debug)]
pub struct TableAllocator<'a, S: TableStore + ReservationStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TableStore + ReservationStore + ?Sized> TableAllocator<'a, S> {
    /// Creates an allocator over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Allocates a table.
    ///
    /// With an explicit table the checks run in order: existence, conflict
    /// window, capacity; no alternative is searched. Without one, candidates
    /// seating the party are tried smallest first (then by id) and the first
    /// free one wins.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage fails; refusals are outcomes.
    pub fn allocate(
        &self,
        conn: &Connection,
        request: &AllocationRequest,
    ) -> Result<AllocationOutcome> {
        match request.table_id {
            Some(table_id) => self.allocate_explicit(conn, table_id, request),
            None => self.allocate_auto(conn, request),
        }
    }

    fn allocate_explicit(
        &self,
        conn: &Connection,
        table_id: i64,
        request: &AllocationRequest,
    ) -> Result<AllocationOutcome> {
        let Some(table) = self.store.find_table_by_id(conn, table_id)? else {
            return Ok(AllocationOutcome::TableNotFound { table_id });
        };

        let checker = ConflictChecker::new(self.store);
        if !checker.is_table_available_excluding(conn, table_id, &request.slot, request.exclude)? {
            log::debug!("table {table_id} is busy at {}", request.slot);
            return Ok(AllocationOutcome::Unavailable {
                table_id: Some(table_id),
            });
        }

        if !table.seats(u32::from(request.pax)) {
            return Ok(AllocationOutcome::InsufficientCapacity { table_id });
        }

        Ok(AllocationOutcome::Allocated(table))
    }

    fn allocate_auto(
        &self,
        conn: &Connection,
        request: &AllocationRequest,
    ) -> Result<AllocationOutcome> {
        let candidates = self
            .store
            .find_by_capacity_at_least(conn, u32::from(request.pax))?;
        if candidates.is_empty() {
            return Ok(AllocationOutcome::NoCandidates);
        }

        let checker = ConflictChecker::new(self.store);
        for table in candidates {
            if checker.is_table_available_excluding(conn, table.id, &request.slot, request.exclude)? {
                log::debug!(
                    "auto-selected table {} ({} seats) for {} guests",
                    table.table_number,
                    table.capacity,
                    request.pax
                );
                return Ok(AllocationOutcome::Allocated(table));
            }
        }

        Ok(AllocationOutcome::Unavailable { table_id: None })
    }

    /// Returns every table seating `pax` that is free at `slot`, in
    /// allocation order.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn available_tables(
        &self,
        conn: &Connection,
        slot: &BookingSlot,
        pax: PartySize,
    ) -> Result<Vec<Table>> {
        let checker = ConflictChecker::new(self.store);
        let mut free = Vec::new();
        for table in self.store.find_by_capacity_at_least(conn, u32::from(pax))? {
            if checker.is_table_available(conn, table.id, slot)? {
                free.push(table);
            }
        }
        Ok(free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        add_test_customer, add_test_table, create_test_database, test_now,
    };
    use crate::database::{Database, SqliteStore};
    use crate::reservation::NewReservation;
    use crate::store::ReservationStore;

    fn pax(n: u32) -> PartySize {
        PartySize::try_from(n).unwrap()
    }

    fn slot(time: &str) -> BookingSlot {
        BookingSlot::parse("2025-06-02", time).unwrap()
    }

    fn occupy(db: &Database, table_id: i64, time: &str) -> i64 {
        let customer = add_test_customer(db, &format!("555-{table_id}-{time}"));
        SqliteStore
            .create_reservation(
                db.connection(),
                &NewReservation {
                    customer_id: customer.id,
                    table_id,
                    pax: pax(2),
                    slot: slot(time),
                    notes: String::new(),
                    deposit_cents: 0,
                    created_at: test_now(),
                },
            )
            .unwrap()
            .id()
    }

    #[test]
    fn test_auto_picks_smallest_fitting_table() {
        let db = create_test_database();
        add_test_table(&db, "T01", 2);
        let four = add_test_table(&db, "T02", 4);
        add_test_table(&db, "T03", 6);

        let request = AllocationRequest::new(pax(3), slot("19:00"));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(outcome, AllocationOutcome::Allocated(four));
    }

    #[test]
    fn test_auto_ties_broken_by_id() {
        let db = create_test_database();
        let first = add_test_table(&db, "T09", 4);
        add_test_table(&db, "T01", 4);

        let request = AllocationRequest::new(pax(4), slot("19:00"));
        let table = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap()
            .into_result(&request)
            .unwrap();
        assert_eq!(table.id, first.id);
    }

    #[test]
    fn test_auto_skips_busy_tables() {
        let db = create_test_database();
        let small = add_test_table(&db, "T01", 4);
        let large = add_test_table(&db, "T02", 6);
        occupy(&db, small.id, "18:30");

        let request = AllocationRequest::new(pax(4), slot("19:00"));
        let table = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap()
            .into_result(&request)
            .unwrap();
        assert_eq!(table.id, large.id);
    }

    #[test]
    fn test_auto_no_candidates_is_insufficient_capacity() {
        let db = create_test_database();
        add_test_table(&db, "T01", 4);

        let request = AllocationRequest::new(pax(12), slot("19:00"));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(outcome, AllocationOutcome::NoCandidates);
        assert!(matches!(
            outcome.into_result(&request),
            Err(Error::InsufficientCapacity { pax: 12 })
        ));
    }

    #[test]
    fn test_auto_all_busy_is_unavailable() {
        let db = create_test_database();
        let only = add_test_table(&db, "T01", 4);
        occupy(&db, only.id, "19:30");

        let request = AllocationRequest::new(pax(2), slot("19:00"));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(outcome, AllocationOutcome::Unavailable { table_id: None });
        assert!(matches!(
            outcome.into_result(&request),
            Err(Error::TableUnavailable { table_id: None, .. })
        ));
    }

    #[test]
    fn test_explicit_missing_table() {
        let db = create_test_database();
        let request = AllocationRequest::new(pax(2), slot("19:00")).with_table(Some(99));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(outcome, AllocationOutcome::TableNotFound { table_id: 99 });
    }

    #[test]
    fn test_explicit_busy_checked_before_capacity() {
        let db = create_test_database();
        let small = add_test_table(&db, "T01", 2);
        occupy(&db, small.id, "19:00");

        let request = AllocationRequest::new(pax(6), slot("20:00")).with_table(Some(small.id));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::Unavailable {
                table_id: Some(small.id)
            }
        );
    }

    #[test]
    fn test_explicit_too_small() {
        let db = create_test_database();
        let small = add_test_table(&db, "T01", 2);
        add_test_table(&db, "T02", 8);

        let request = AllocationRequest::new(pax(6), slot("19:00")).with_table(Some(small.id));
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::InsufficientCapacity { table_id: small.id }
        );
    }

    #[test]
    fn test_explicit_exclusion_ignores_own_booking() {
        let db = create_test_database();
        let table = add_test_table(&db, "T01", 4);
        let own = occupy(&db, table.id, "19:00");

        let request = AllocationRequest::new(pax(2), slot("19:30"))
            .with_table(Some(table.id))
            .excluding(own);
        let outcome = TableAllocator::new(&SqliteStore)
            .allocate(db.connection(), &request)
            .unwrap();
        assert!(outcome.is_allocated());
    }

    #[test]
    fn test_available_tables_lists_free_in_order() {
        let db = create_test_database();
        let t1 = add_test_table(&db, "T01", 2);
        let t2 = add_test_table(&db, "T02", 4);
        let t3 = add_test_table(&db, "T03", 4);
        add_test_table(&db, "T04", 1);
        occupy(&db, t2.id, "19:00");

        let free = TableAllocator::new(&SqliteStore)
            .available_tables(db.connection(), &slot("20:00"), pax(2))
            .unwrap();
        let ids: Vec<i64> = free.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![t1.id, t3.id]);
    }
}
