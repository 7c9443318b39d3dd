//! The booking database handle.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;
use super::migrations;

/// Pragmas applied to every connection after the busy timeout is set.
const CONNECTION_PRAGMAS: &str = "PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;";

/// One `SQLite` connection to the booking database.
///
/// Several processes, or threads each holding their own `Database`, may
/// open the same file. Writers are serialized by the database lock and wait
/// up to the busy timeout for it.
///
/// # Examples
///
/// ```no_run
/// use tablebook::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::in_data_dir("/srv/bistro")).unwrap();
/// println!("{}", db.path().display());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens (creating if needed) the database described by `config`.
    ///
    /// The parent directory is created, the connection switched to WAL with
    /// foreign keys on, and the schema initialized or checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created, a
    /// pragma fails, or the stored schema is unsupported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open_with_flags(
            &config.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Set first so the pragmas below also wait out a concurrent opener.
        conn.busy_timeout(config.busy_timeout)?;
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        migrations::ensure_schema(&mut conn)?;

        log::debug!(
            "opened booking database at {} (journal {mode}, busy timeout {:?})",
            config.path.display(),
            config.busy_timeout
        );
        Ok(Self { conn, config })
    }

    /// The underlying connection, for reads outside a unit of work.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// The configured busy timeout.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.config.busy_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::CURRENT_SCHEMA_VERSION;
    use tempfile::tempdir;

    fn pragma<T: rusqlite::types::FromSql>(db: &Database, name: &str) -> T {
        db.connection()
            .query_row(&format!("PRAGMA {name}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_open_applies_pragmas() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::in_data_dir(dir.path())).unwrap();

        assert_eq!(pragma::<String>(&db, "journal_mode").to_lowercase(), "wal");
        assert_eq!(pragma::<i64>(&db, "foreign_keys"), 1);
        // NORMAL
        assert_eq!(pragma::<i64>(&db, "synchronous"), 1);
    }

    #[test]
    fn test_open_creates_data_directory() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("bistro").join("data");
        let db = Database::open(DatabaseConfig::in_data_dir(&data_dir)).unwrap();

        assert!(data_dir.join("tablebook.db").exists());
        assert_eq!(db.path(), data_dir.join("tablebook.db"));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::in_data_dir(dir.path());
        {
            let db = Database::open(config.clone()).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO dining_tables (table_number, capacity, created_at, updated_at) \
                     VALUES ('T01', 2, 0, 0)",
                    [],
                )
                .unwrap();
        }

        let db = Database::open(config).unwrap();
        assert_eq!(
            migrations::schema_version(db.connection()).unwrap(),
            CURRENT_SCHEMA_VERSION
        );
        let tables: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM dining_tables", [], |row| row.get(0))
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_busy_timeout_accessor() {
        let dir = tempdir().unwrap();
        let config = DatabaseConfig::in_data_dir(dir.path())
            .with_busy_timeout(Duration::from_millis(250));
        let db = Database::open(config).unwrap();
        assert_eq!(db.busy_timeout(), Duration::from_millis(250));
    }
}
