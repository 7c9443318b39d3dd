//! Common test utilities for integration tests.
//!
//! This module provides a seeded floor plan, a frozen clock and request
//! builders for exercising the booking operations end to end.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tablebook::booking::BookingSettings;
use tablebook::config::FloorPlanTable;
use tablebook::database::{Database, DatabaseConfig, SqliteStore};
use tablebook::store::TableStore;
use tablebook::{
    ContactDetails, CreateReservationRequest, FixedClock, ReservationDetails, ReservationManager,
    Table, TableCatalog,
};

/// The manager type used across integration tests.
pub type TestManager = ReservationManager<SqliteStore, FixedClock>;

/// "Now" for every test: 2025-06-01 12:00.
#[allow(dead_code)]
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// The day after [`now`].
#[allow(dead_code)]
pub const TOMORROW: &str = "2025-06-02";

/// A database in a temporary directory, with the directory kept alive.
#[allow(dead_code)]
pub fn create_test_database() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    (dir, db)
}

/// Path of the database inside `dir`, for opening extra connections.
#[allow(dead_code)]
pub fn database_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("test.db")
}

/// The standard floor plan: T01 (2 seats), T02 (4), T03 (4).
#[allow(dead_code)]
pub fn floor_plan() -> Vec<FloorPlanTable> {
    [("T01", 2), ("T02", 4), ("T03", 4)]
        .into_iter()
        .map(|(number, capacity)| FloorPlanTable {
            number: number.into(),
            capacity,
        })
        .collect()
}

/// Seeds the standard floor plan and returns the added tables.
#[allow(dead_code)]
pub fn seed_tables(db: &mut Database) -> Vec<Table> {
    TableCatalog::new(&SqliteStore)
        .sync_floor_plan(db, &floor_plan())
        .unwrap()
}

/// Looks a table up by number.
#[allow(dead_code)]
pub fn table(db: &Database, number: &str) -> Table {
    SqliteStore
        .find_by_number(db.connection(), number)
        .unwrap()
        .unwrap()
}

/// A manager with a clock frozen at [`now`].
#[allow(dead_code)]
pub fn manager() -> TestManager {
    ReservationManager::new(
        SqliteStore,
        FixedClock::new(now()),
        BookingSettings::default(),
    )
}

/// Builder for create requests with sensible defaults.
///
/// Defaults: Ms Jane Smith, phone `555-0100`, 2 guests, tomorrow at 19:00,
/// auto-selected table.
#[allow(dead_code)]
pub struct BookingFixture {
    request: CreateReservationRequest,
}

#[allow(dead_code)]
impl BookingFixture {
    pub fn new() -> Self {
        Self {
            request: CreateReservationRequest {
                customer: ContactDetails {
                    title: "Ms".into(),
                    first_name: "Jane".into(),
                    last_name: "Smith".into(),
                    phone: "555-0100".into(),
                    email: String::new(),
                },
                reservation: ReservationDetails {
                    pax_number: 2,
                    reservation_date: TOMORROW.into(),
                    reservation_time: "19:00".into(),
                    table_id: None,
                    notes: String::new(),
                },
            },
        }
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.request.customer.phone = phone.into();
        self
    }

    pub fn pax(mut self, pax: i64) -> Self {
        self.request.reservation.pax_number = pax;
        self
    }

    pub fn at(mut self, date: &str, time: &str) -> Self {
        self.request.reservation.reservation_date = date.into();
        self.request.reservation.reservation_time = time.into();
        self
    }

    pub fn table(mut self, table_id: i64) -> Self {
        self.request.reservation.table_id = Some(table_id);
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.request.reservation.notes = notes.into();
        self
    }

    pub fn build(self) -> CreateReservationRequest {
        self.request
    }
}

impl Default for BookingFixture {
    fn default() -> Self {
        Self::new()
    }
}
