//! Storage traits for customers, tables and reservations.
//!
//! Every method takes the connection it must run on. Callers pass a
//! [`rusqlite::Transaction`] (which derefs to [`Connection`]) when the call
//! is part of a unit of work, so the transaction boundary is always explicit
//! at the call site and never ambient.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

use crate::customer::{Customer, NewCustomer};
use crate::error::Result;
use crate::reservation::{NewReservation, Reservation, ReservationStatus};
use crate::slot::BookingSlot;
use crate::table::{NewTable, Table, TableStatus};

/// Customer persistence.
#[cfg_attr(test, mockall::automock)]
pub trait CustomerStore {
    /// Looks a customer up by phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_phone(&self, conn: &Connection, phone: &str) -> Result<Option<Customer>>;

    /// Looks a customer up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_customer_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Customer>>;

    /// Inserts a new customer stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the phone
    /// number is already taken.
    fn create_customer(
        &self,
        conn: &Connection,
        customer: &NewCustomer,
        at: NaiveDateTime,
    ) -> Result<Customer>;
}

/// Table persistence.
#[cfg_attr(test, mockall::automock)]
pub trait TableStore {
    /// Looks a table up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_table_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Table>>;

    /// Looks a table up by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_number(&self, conn: &Connection, table_number: &str) -> Result<Option<Table>>;

    /// Returns every table seating at least `pax`, smallest first, then by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_capacity_at_least(&self, conn: &Connection, pax: u32) -> Result<Vec<Table>>;

    /// Returns every table ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_tables(&self, conn: &Connection) -> Result<Vec<Table>>;

    /// Inserts a new `available` table stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the number is taken.
    fn create_table(&self, conn: &Connection, table: &NewTable, at: NaiveDateTime) -> Result<Table>;

    /// Sets a table's occupancy status, stamping `updated_at` with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TableNotFound`] if no row was updated.
    fn update_table_status(
        &self,
        conn: &Connection,
        id: i64,
        status: TableStatus,
        at: NaiveDateTime,
    ) -> Result<()>;
}

/// Reservation persistence.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore {
    /// Inserts a new `awaiting` reservation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TableUnavailable`] if storage rejects the row
    /// as overlapping an active reservation, or a storage error.
    fn create_reservation(&self, conn: &Connection, reservation: &NewReservation)
        -> Result<Reservation>;

    /// Looks a reservation up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_reservation_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Reservation>>;

    /// Returns one page of reservations matching `filter`, plus the total
    /// number of matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_all(
        &self,
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<(Vec<Reservation>, u64)>;

    /// Writes every mutable field of `reservation` back.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ReservationNotFound`] if the row is gone, or
    /// [`crate::Error::TableUnavailable`] if a table change overlaps another booking.
    fn update_reservation(&self, conn: &Connection, reservation: &Reservation) -> Result<()>;

    /// Sets only the status, stamping `updated_at` with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ReservationNotFound`] if no row was updated.
    fn update_reservation_status(
        &self,
        conn: &Connection,
        id: i64,
        status: ReservationStatus,
        at: NaiveDateTime,
    ) -> Result<()>;

    /// Returns `true` if no active reservation on `table_id` lies within the
    /// conflict window of `slot`. `exclude` skips one reservation id, so a
    /// booking being moved does not collide with itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn is_table_available(
        &self,
        conn: &Connection,
        table_id: i64,
        slot: &BookingSlot,
        exclude: Option<i64>,
    ) -> Result<bool>;
}

/// Filter and page bounds for [`ReservationStore::find_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only this date.
    pub date: Option<NaiveDate>,
    /// Only this status.
    pub status: Option<ReservationStatus>,
    /// Only this customer.
    pub customer_id: Option<i64>,
    /// Only this table.
    pub table_id: Option<i64>,
    /// Maximum rows to return.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u64,
}

impl Default for ReservationFilter {
    fn default() -> Self {
        Self {
            date: None,
            status: None,
            customer_id: None,
            table_id: None,
            limit: 10,
            offset: 0,
        }
    }
}
