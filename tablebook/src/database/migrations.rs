//! Schema creation and version checks.
//!
//! A database is either empty (no `metadata` row yet), at
//! [`CURRENT_SCHEMA_VERSION`], or unsupported. Empty databases are
//! initialized inside one IMMEDIATE transaction so two processes opening a
//! fresh file at the same time cannot both lay the schema down.

use rusqlite::{Connection, ErrorCode, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CAPACITY_INDEX, CREATE_CUSTOMERS_TABLE, CREATE_CUSTOMER_INDEX, CREATE_DATE_INDEX,
    CREATE_INSERT_CONFLICT_TRIGGER, CREATE_METADATA_TABLE, CREATE_RESERVATIONS_TABLE,
    CREATE_TABLES_TABLE, CREATE_TABLE_DATE_INDEX, CREATE_UPDATE_CONFLICT_TRIGGER,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Statements that build version 1, in dependency order.
const SCHEMA_V1: [&str; 10] = [
    CREATE_METADATA_TABLE,
    CREATE_CUSTOMERS_TABLE,
    CREATE_TABLES_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_TABLE_DATE_INDEX,
    CREATE_DATE_INDEX,
    CREATE_CUSTOMER_INDEX,
    CREATE_CAPACITY_INDEX,
    CREATE_INSERT_CONFLICT_TRIGGER,
    CREATE_UPDATE_CONFLICT_TRIGGER,
];

/// What [`schema_state`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// No schema yet.
    Empty,
    /// The schema this build writes.
    Current,
    /// A schema from some other build.
    Unsupported(i32),
}

/// Reads the stored schema version; `0` means none.
///
/// # Errors
///
/// Returns an error if the metadata query fails for a reason other than a
/// missing table or row.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let raw: Option<String> = match conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()
    {
        Ok(raw) => raw,
        // A missing metadata table surfaces as the generic SQLITE_ERROR.
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::Unknown => None,
        Err(e) => return Err(e.into()),
    };

    match raw {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema_version is not a number: '{value}'"),
        }),
    }
}

/// Classifies the database behind `conn`.
///
/// # Errors
///
/// Returns an error if the version cannot be read.
pub fn schema_state(conn: &Connection) -> Result<SchemaState> {
    Ok(match schema_version(conn)? {
        0 => SchemaState::Empty,
        CURRENT_SCHEMA_VERSION => SchemaState::Current,
        other => SchemaState::Unsupported(other),
    })
}

/// Creates every table, index and trigger and records the version.
///
/// # Errors
///
/// Returns an error if any statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use tablebook::database::migrations::{initialize_schema, schema_state, SchemaState};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(schema_state(&conn).unwrap(), SchemaState::Current);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_V1 {
        conn.execute_batch(statement)?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    log::debug!("initialized booking schema v{CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Initializes an empty database and rejects unsupported ones.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] for a foreign schema, or a
/// storage error.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    match schema_state(conn)? {
        SchemaState::Current => return Ok(()),
        SchemaState::Unsupported(found) => {
            return Err(Error::UnsupportedSchemaVersion {
                expected: CURRENT_SCHEMA_VERSION,
                found,
            })
        }
        SchemaState::Empty => {}
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Another opener may have won the race while we waited for the lock.
    if schema_state(&tx)? == SchemaState::Empty {
        initialize_schema(&tx)?;
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn count(conn: &Connection, sql: &str) -> i64 {
        conn.query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn test_fresh_database_is_empty() {
        let conn = memory();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        assert_eq!(schema_state(&conn).unwrap(), SchemaState::Empty);
    }

    #[test]
    fn test_ensure_schema_initializes_once() {
        let mut conn = memory();
        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
        for table in ["customers", "dining_tables", "reservations"] {
            assert_eq!(count(&conn, &format!("SELECT COUNT(*) FROM {table}")), 0);
        }
        assert_eq!(count(&conn, "SELECT COUNT(*) FROM metadata"), 1);
    }

    #[test]
    fn test_indices_and_triggers() {
        let conn = memory();
        initialize_schema(&conn).unwrap();

        assert_eq!(
            count(
                &conn,
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'"
            ),
            4
        );
        assert_eq!(
            count(&conn, "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger'"),
            2
        );
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let mut conn = memory();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        assert_eq!(schema_state(&conn).unwrap(), SchemaState::Unsupported(999));
        assert!(matches!(
            ensure_schema(&mut conn),
            Err(Error::UnsupportedSchemaVersion { found: 999, .. })
        ));
    }

    #[test]
    fn test_garbage_version_is_corruption() {
        let conn = memory();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = 'one' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        assert!(matches!(
            schema_version(&conn),
            Err(Error::DatabaseCorruption { .. })
        ));
    }

    #[test]
    fn test_capacity_check_constraint() {
        let conn = memory();
        initialize_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO dining_tables (table_number, capacity, created_at, updated_at) \
             VALUES ('T0', 0, 0, 0)",
            [],
        );
        assert!(result.is_err());
    }
}
