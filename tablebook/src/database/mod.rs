//! Database layer for persistent storage of customers, tables and reservations.
//!
//! This module provides a SQLite-based storage layer: connection
//! management, schema versioning, units of work, and [`SqliteStore`], the
//! implementation of the [`crate::store`] traits.
//!
//! # Examples
//!
//! ```no_run
//! use tablebook::database::{Database, DatabaseConfig, SqliteStore};
//! use tablebook::store::TableStore;
//! use tablebook::{Clock, NewTable, SystemClock};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
//!
//! let tx = db.begin_unit_of_work().unwrap();
//! SqliteStore
//!     .create_table(&tx, &NewTable::new("T01", 4).unwrap(), SystemClock.now())
//!     .unwrap();
//! tx.commit().unwrap();
//!
//! for table in SqliteStore.list_tables(db.connection()).unwrap() {
//!     println!("{} seats {}", table.table_number, table.capacity);
//! }
//! ```

mod config;
mod connection;
mod customers;
pub mod migrations;
mod reservations;
mod schema;
mod store;
mod tables;
mod transaction;

#[cfg(test)]
pub mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
    DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub use store::SqliteStore;

pub use migrations::{ensure_schema, initialize_schema, schema_state, schema_version, SchemaState};
