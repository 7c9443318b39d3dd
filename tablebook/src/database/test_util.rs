//! Shared test utilities for database unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use crate::customer::{Customer, NewCustomer};
use crate::database::{Database, DatabaseConfig, SqliteStore};
use crate::store::{CustomerStore, TableStore};
use crate::table::{NewTable, Table};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// A fixed timestamp for rows created in tests.
///
/// # Panics
///
/// Never; the date is a literal.
#[must_use]
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Inserts a table with the given number and capacity.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn add_test_table(db: &Database, number: &str, capacity: u32) -> Table {
    SqliteStore
        .create_table(
            db.connection(),
            &NewTable::new(number, capacity).unwrap(),
            test_now(),
        )
        .unwrap()
}

/// Inserts a customer with the given phone number.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn add_test_customer(db: &Database, phone: &str) -> Customer {
    SqliteStore
        .create_customer(
            db.connection(),
            &NewCustomer {
                title: None,
                first_name: "Test".into(),
                last_name: "Guest".into(),
                phone: phone.into(),
                email: None,
            },
            test_now(),
        )
        .unwrap()
}
