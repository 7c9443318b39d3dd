//! The reservation lifecycle: create, status changes, reassignment, cancel
//! and check-in.
//!
//! Every mutating operation takes `&mut Database` and runs all of its reads
//! and writes inside one unit of work (`BEGIN IMMEDIATE`). The write lock is
//! therefore held from the availability check through to commit, and any
//! error rolls back the customer, reservation and table writes together.
//!
//! Table status follows the reservation holding the table:
//!
//! | Reservation event          | Table becomes |
//! |----------------------------|---------------|
//! | created                    | `reserved`    |
//! | checked in                 | `occupied`    |
//! | moved to another table     | old `available`, new `reserved`/`occupied` |
//! | cancelled or completed     | `available`   |

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::database::{Database, SqliteStore};
use crate::error::{Error, Result};
use crate::request::{
    AvailableTablesQuery, CancelRequest, CreateReservationRequest, Page, ReassignRequest,
    ReservationQuery, ReservationView, UpdateStatusRequest,
};
use crate::reservation::{NewReservation, PartySize, Reservation, ReservationStatus};
use crate::slot::BookingSlot;
use crate::store::{CustomerStore, ReservationStore, TableStore};
use crate::table::{Table, TableStatus};

use super::allocator::{AllocationRequest, TableAllocator};
use super::resolver::CustomerResolver;
use super::BookingSettings;

/// Pseudo-status used in transition errors for a rejected check-in.
const CHECKED_IN: &str = "checked_in";

/// Pseudo-status used in transition errors for a rejected reassignment.
const REASSIGNED: &str = "reassigned";

/// Drives reservations through their lifecycle.
///
/// The store and clock are injected so tests can swap in a
/// [`crate::clock::FixedClock`]; production code uses
/// [`ReservationManager::from_config`].
///
/// # Examples
///
/// ```no_run
/// use tablebook::booking::ReservationManager;
/// use tablebook::database::{Database, DatabaseConfig};
/// use tablebook::{Config, CreateReservationRequest};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
/// let manager = ReservationManager::from_config(&Config::default());
///
/// let body = r#"{
///     "customer": {"first_name": "John", "phone": "081234567890"},
///     "reservation": {"pax_number": 4, "reservation_date": "2030-12-25",
///                     "reservation_time": "19:00"}
/// }"#;
/// let request: CreateReservationRequest = serde_json::from_str(body).unwrap();
/// let view = manager.create(&mut db, &request).unwrap();
/// println!("booked table {}", view.table.table_number);
/// ```
#[derive(Debug, Clone)]
pub struct ReservationManager<S = SqliteStore, K = SystemClock> {
    store: S,
    clock: K,
    settings: BookingSettings,
}

impl ReservationManager<SqliteStore, SystemClock> {
    /// Builds the production manager: SQLite storage and the system clock.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(SqliteStore, SystemClock, BookingSettings::from_config(config))
    }
}

impl Default for ReservationManager<SqliteStore, SystemClock> {
    fn default() -> Self {
        Self::new(SqliteStore, SystemClock, BookingSettings::default())
    }
}

impl<S, K> ReservationManager<S, K>
where
    S: CustomerStore + TableStore + ReservationStore,
    K: Clock,
{
    /// Creates a manager from its parts.
    #[must_use]
    pub const fn new(store: S, clock: K, settings: BookingSettings) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    /// Returns the pagination settings.
    #[must_use]
    pub const fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &K {
        &self.clock
    }

    /// Books a table.
    ///
    /// The request is validated in order (contact block, party size, date,
    /// time, lead time) before any storage access. Then, in one unit of
    /// work: the customer is resolved by phone, a table is allocated, the
    /// reservation is inserted as `awaiting` and the table is marked
    /// `reserved`.
    ///
    /// # Errors
    ///
    /// Returns a validation or format error for bad input,
    /// [`Error::InvalidReservationTime`] for a slot less than an hour away,
    /// any allocation refusal ([`Error::TableNotFound`],
    /// [`Error::TableUnavailable`], [`Error::InsufficientCapacity`]),
    /// [`Error::LockTimeout`], or a storage error.
    pub fn create(
        &self,
        db: &mut Database,
        request: &CreateReservationRequest,
    ) -> Result<ReservationView> {
        let contact = request.customer.validate()?;
        let details = &request.reservation;
        let pax = details.party_size()?;
        let slot = details.slot()?;
        let now = self.clock.now();
        slot.ensure_bookable_at(now)?;

        let view = db.with_unit_of_work(|tx| {
            let customer = CustomerResolver::new(&self.store).resolve(tx, &contact, now)?;

            let allocation = AllocationRequest::new(pax, slot).with_table(details.requested_table());
            let table = TableAllocator::new(&self.store)
                .allocate(tx, &allocation)?
                .into_result(&allocation)?;

            let reservation = self.store.create_reservation(
                tx,
                &NewReservation {
                    customer_id: customer.id,
                    table_id: table.id,
                    pax,
                    slot,
                    notes: details.notes.clone(),
                    deposit_cents: 0,
                    created_at: now,
                },
            )?;
            self.store
                .update_table_status(tx, table.id, TableStatus::Reserved, now)?;

            self.load_view(tx, &reservation)
        })?;

        log::info!(
            "reservation {} created: table {} at {} for {} guests",
            view.id,
            view.table.table_number,
            BookingSlot::new(view.reservation_date, view.reservation_time),
            view.pax_number
        );
        Ok(view)
    }

    /// Changes a reservation's status, optionally moving it to another table
    /// or replacing its notes in the same unit of work.
    ///
    /// The target must differ from the current status and be reachable from
    /// it. Edits that keep the status go through [`Self::reassign`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatus`], [`Error::ReservationNotFound`] or
    /// [`Error::InvalidStatusTransition`], checked in that order. A table
    /// move onto a terminal status is [`Error::Validation`]; a move onto an
    /// unsuitable table returns the allocation refusal.
    pub fn update_status(
        &self,
        db: &mut Database,
        id: i64,
        request: &UpdateStatusRequest,
    ) -> Result<ReservationView> {
        let target: ReservationStatus = request.status.trim().parse()?;
        let now = self.clock.now();

        let view = db.with_unit_of_work(|tx| {
            let mut reservation = self.require(tx, id)?;
            let current = reservation.status();
            if !current.can_transition_to(target) {
                return Err(Error::InvalidStatusTransition {
                    from: current,
                    to: target.to_string(),
                });
            }

            let mut moved_to = None;
            if let Some(table_id) = request.requested_table() {
                if !target.is_active() {
                    return Err(Error::Validation {
                        field: "table_id".into(),
                        message: format!("cannot reassign the table of a {target} reservation"),
                    });
                }
                moved_to = self.move_table(tx, &mut reservation, table_id, now)?;
            }

            if let Some(notes) = &request.notes {
                reservation.set_notes(notes.as_str());
            }
            reservation.set_status(target);
            if target == ReservationStatus::Completed {
                reservation.mark_checked_out(now);
            }
            reservation.touch(now);
            self.store.update_reservation(tx, &reservation)?;

            if target.is_terminal() {
                self.store.update_table_status(
                    tx,
                    reservation.table_id(),
                    TableStatus::Available,
                    now,
                )?;
            } else if let Some(table) = moved_to {
                self.hold_table(tx, &reservation, &table, now)?;
            }

            self.load_view(tx, &reservation)
        })?;

        log::info!("reservation {id} is now {}", view.status);
        Ok(view)
    }

    /// Moves an active reservation to another table and/or replaces its
    /// notes, leaving the status alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a request with nothing to change,
    /// [`Error::ReservationNotFound`], [`Error::InvalidStatusTransition`]
    /// (to `reassigned`) for a cancelled or completed reservation, or the
    /// allocation refusal for an unsuitable table.
    pub fn reassign(
        &self,
        db: &mut Database,
        id: i64,
        request: &ReassignRequest,
    ) -> Result<ReservationView> {
        if request.is_empty() {
            return Err(Error::Validation {
                field: "table_id".into(),
                message: "nothing to reassign: give a table or notes".into(),
            });
        }
        let now = self.clock.now();

        let view = db.with_unit_of_work(|tx| {
            let mut reservation = self.require(tx, id)?;
            if !reservation.status().is_active() {
                return Err(Error::InvalidStatusTransition {
                    from: reservation.status(),
                    to: REASSIGNED.into(),
                });
            }

            let moved_to = match request.requested_table() {
                Some(table_id) => self.move_table(tx, &mut reservation, table_id, now)?,
                None => None,
            };
            if let Some(notes) = &request.notes {
                reservation.set_notes(notes.as_str());
            }
            reservation.touch(now);
            self.store.update_reservation(tx, &reservation)?;
            if let Some(table) = moved_to {
                self.hold_table(tx, &reservation, &table, now)?;
            }

            self.load_view(tx, &reservation)
        })?;

        log::info!(
            "reservation {id} reassigned to table {}",
            view.table.table_number
        );
        Ok(view)
    }

    /// Points `reservation` at `table_id` after checking the table can take
    /// it, and frees the table it held. `None` when it already sits there.
    fn move_table(
        &self,
        conn: &Connection,
        reservation: &mut Reservation,
        table_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<Table>> {
        if table_id == reservation.table_id() {
            return Ok(None);
        }
        let allocation = AllocationRequest::new(reservation.pax(), reservation.slot())
            .with_table(Some(table_id))
            .excluding(reservation.id());
        let table = TableAllocator::new(&self.store)
            .allocate(conn, &allocation)?
            .into_result(&allocation)?;

        self.store.update_table_status(
            conn,
            reservation.table_id(),
            TableStatus::Available,
            now,
        )?;
        log::debug!(
            "moving reservation {} from table {} to table {}",
            reservation.id(),
            reservation.table_id(),
            table.id
        );
        reservation.set_table_id(table.id);
        Ok(Some(table))
    }

    /// Marks the table a moved reservation now holds.
    fn hold_table(
        &self,
        conn: &Connection,
        reservation: &Reservation,
        table: &Table,
        now: NaiveDateTime,
    ) -> Result<()> {
        let status = if reservation.checked_in_at().is_some() {
            TableStatus::Occupied
        } else {
            TableStatus::Reserved
        };
        self.store.update_table_status(conn, table.id, status, now)
    }

    /// Cancels an awaiting or confirmed reservation and frees its table.
    ///
    /// A non-empty reason is appended to the notes as
    /// `Cancellation reason: <reason>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a reason over 500 characters,
    /// [`Error::ReservationNotFound`], or [`Error::InvalidStatusTransition`]
    /// if the reservation is already cancelled or completed.
    pub fn cancel(
        &self,
        db: &mut Database,
        id: i64,
        request: &CancelRequest,
    ) -> Result<ReservationView> {
        let reason = request.validated_reason()?;
        let now = self.clock.now();

        let view = db.with_unit_of_work(|tx| {
            let mut reservation = self.require(tx, id)?;
            let current = reservation.status();
            if !current.can_transition_to(ReservationStatus::Cancelled) {
                return Err(Error::InvalidStatusTransition {
                    from: current,
                    to: ReservationStatus::Cancelled.to_string(),
                });
            }

            reservation.set_status(ReservationStatus::Cancelled);
            if let Some(reason) = reason {
                reservation.append_note(&format!("Cancellation reason: {reason}"));
            }
            reservation.touch(now);
            self.store.update_reservation(tx, &reservation)?;
            self.store.update_table_status(
                tx,
                reservation.table_id(),
                TableStatus::Available,
                now,
            )?;

            self.load_view(tx, &reservation)
        })?;

        log::info!("reservation {id} cancelled");
        Ok(view)
    }

    /// Seats a confirmed party: stamps the check-in time and marks the table
    /// `occupied`. The status stays `confirmed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`], or
    /// [`Error::InvalidStatusTransition`] (to `checked_in`) if the
    /// reservation is not confirmed or was already checked in.
    pub fn check_in(&self, db: &mut Database, id: i64) -> Result<ReservationView> {
        let now = self.clock.now();

        let view = db.with_unit_of_work(|tx| {
            let mut reservation = self.require(tx, id)?;
            if reservation.status() != ReservationStatus::Confirmed
                || reservation.checked_in_at().is_some()
            {
                return Err(Error::InvalidStatusTransition {
                    from: reservation.status(),
                    to: CHECKED_IN.into(),
                });
            }

            reservation.mark_checked_in(now);
            reservation.touch(now);
            self.store.update_reservation(tx, &reservation)?;
            self.store.update_table_status(
                tx,
                reservation.table_id(),
                TableStatus::Occupied,
                now,
            )?;

            self.load_view(tx, &reservation)
        })?;

        log::info!("reservation {id} checked in at table {}", view.table.table_number);
        Ok(view)
    }

    /// Lists the tables free for `query`, smallest first.
    ///
    /// A read only; no write lock is taken.
    ///
    /// # Errors
    ///
    /// Returns a validation or format error for bad input, or a storage error.
    pub fn available_tables(
        &self,
        db: &Database,
        query: &AvailableTablesQuery,
    ) -> Result<Vec<Table>> {
        let pax = PartySize::try_from(query.pax)?;
        let slot = BookingSlot::parse(&query.date, &query.time)?;
        TableAllocator::new(&self.store).available_tables(db.connection(), &slot, pax)
    }

    /// Loads one reservation with its customer and table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationNotFound`] for an unknown id.
    pub fn get(&self, db: &Database, id: i64) -> Result<ReservationView> {
        let conn = db.connection();
        let reservation = self.require(conn, id)?;
        self.load_view(conn, &reservation)
    }

    /// Lists reservations, newest slot first.
    ///
    /// # Errors
    ///
    /// Returns a format error for a malformed date or status filter, or a
    /// storage error.
    pub fn list(&self, db: &Database, query: &ReservationQuery) -> Result<Page<ReservationView>> {
        let conn = db.connection();
        let filter = query.to_filter(&self.settings)?;
        let (rows, total) = self.store.find_all(conn, &filter)?;

        let items = rows
            .iter()
            .map(|reservation| self.load_view(conn, reservation))
            .collect::<Result<Vec<_>>>()?;

        let (page, per_page) = query.page_bounds(&self.settings);
        Ok(Page::new(items, total, page, per_page))
    }

    fn require(&self, conn: &Connection, id: i64) -> Result<Reservation> {
        self.store
            .find_reservation_by_id(conn, id)?
            .ok_or(Error::ReservationNotFound { id })
    }

    fn load_view(&self, conn: &Connection, reservation: &Reservation) -> Result<ReservationView> {
        let customer = self
            .store
            .find_customer_by_id(conn, reservation.customer_id())?
            .ok_or_else(|| Error::DatabaseCorruption {
                details: format!(
                    "reservation {} references missing customer {}",
                    reservation.id(),
                    reservation.customer_id()
                ),
            })?;
        let table = self
            .store
            .find_table_by_id(conn, reservation.table_id())?
            .ok_or_else(|| Error::DatabaseCorruption {
                details: format!(
                    "reservation {} references missing table {}",
                    reservation.id(),
                    reservation.table_id()
                ),
            })?;
        Ok(ReservationView::new(reservation, customer, table))
    }
}
