//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, triggers and
//! statements used by the booking storage layer.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Message raised by the overlap triggers.
pub const CONFLICT_MESSAGE: &str = "reservation_conflict";

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the customers table.
///
/// Phone numbers are unique: a customer is resolved by phone and created
/// on first sight.
pub const CREATE_CUSTOMERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL UNIQUE,
        email TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the dining tables table.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dining_tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_number TEXT NOT NULL UNIQUE CHECK (length(table_number) > 0),
        capacity INTEGER NOT NULL CHECK (capacity >= 1),
        status TEXT NOT NULL DEFAULT 'available'
            CHECK (status IN ('available', 'occupied', 'reserved')),
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// The start time is stored as minutes since midnight so the conflict
/// window is plain integer arithmetic.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL REFERENCES customers(id),
        table_id INTEGER NOT NULL REFERENCES dining_tables(id),
        pax INTEGER NOT NULL CHECK (pax BETWEEN 1 AND 20),
        reservation_date TEXT NOT NULL,
        reservation_minute INTEGER NOT NULL
            CHECK (reservation_minute BETWEEN 0 AND 1439),
        deposit_cents INTEGER NOT NULL DEFAULT 0 CHECK (deposit_cents >= 0),
        status TEXT NOT NULL
            CHECK (status IN ('awaiting', 'confirmed', 'cancelled', 'completed')),
        notes TEXT NOT NULL DEFAULT '',
        checked_in_at INTEGER,
        checked_out_at INTEGER,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// Index backing the conflict check.
pub const CREATE_TABLE_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_table_date \
     ON reservations(table_id, reservation_date)";

/// Index backing date-ordered listing.
pub const CREATE_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_date \
     ON reservations(reservation_date, reservation_minute)";

/// Index backing per-customer listing.
pub const CREATE_CUSTOMER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_customer ON reservations(customer_id)";

/// Index backing capacity lookups.
pub const CREATE_CAPACITY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_dining_tables_capacity ON dining_tables(capacity, id)";

/// Rejects inserting an active reservation that overlaps another on the same table.
pub const CREATE_INSERT_CONFLICT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_conflict_insert
    BEFORE INSERT ON reservations
    WHEN NEW.status IN ('awaiting', 'confirmed')
    BEGIN
        SELECT RAISE(ABORT, 'reservation_conflict')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.table_id = NEW.table_id
              AND r.reservation_date = NEW.reservation_date
              AND r.status IN ('awaiting', 'confirmed')
              AND ABS(r.reservation_minute - NEW.reservation_minute) < 120
        );
    END";

/// Rejects moving an active reservation onto an overlapping slot.
pub const CREATE_UPDATE_CONFLICT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS trg_reservations_conflict_update
    BEFORE UPDATE OF table_id, reservation_date, reservation_minute ON reservations
    WHEN NEW.status IN ('awaiting', 'confirmed')
    BEGIN
        SELECT RAISE(ABORT, 'reservation_conflict')
        WHERE EXISTS (
            SELECT 1 FROM reservations r
            WHERE r.id != NEW.id
              AND r.table_id = NEW.table_id
              AND r.reservation_date = NEW.reservation_date
              AND r.status IN ('awaiting', 'confirmed')
              AND ABS(r.reservation_minute - NEW.reservation_minute) < 120
        );
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every customer SELECT.
pub const CUSTOMER_COLUMNS: &str =
    "id, title, first_name, last_name, phone, email, created_at, updated_at";

/// Column list shared by every table SELECT.
pub const TABLE_COLUMNS: &str = "id, table_number, capacity, status, created_at, updated_at";

/// Column list shared by every reservation SELECT.
pub const RESERVATION_COLUMNS: &str = "id, customer_id, table_id, pax, reservation_date, \
     reservation_minute, deposit_cents, status, notes, checked_in_at, checked_out_at, \
     created_at, updated_at";

/// Counts active reservations on a table that overlap a slot.
pub const COUNT_CONFLICTS: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE table_id = ?1
      AND reservation_date = ?2
      AND status IN ('awaiting', 'confirmed')
      AND ABS(reservation_minute - ?3) < 120
      AND (?4 IS NULL OR id != ?4)
";
