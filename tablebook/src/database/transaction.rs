//! Units of work.
//!
//! Every mutating booking operation runs inside one `BEGIN IMMEDIATE`
//! transaction, so the write lock is held from the first availability read
//! through to commit. A concurrent writer waits up to the busy timeout and
//! then fails with [`Error::LockTimeout`].

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Opens an IMMEDIATE transaction.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer held the lock for
    /// longer than the busy timeout, or a storage error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tablebook::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tablebook.db")).unwrap();
    /// let tx = db.begin_unit_of_work().unwrap();
    /// // ... store calls taking &tx ...
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_unit_of_work(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.busy_timeout().as_secs().max(1);
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| map_busy(e, seconds))?;
        log::debug!("acquired write lock");
        Ok(tx)
    }

    /// Runs `work` inside a unit of work and commits if it succeeds.
    ///
    /// Any error from `work` rolls the whole unit back.
    ///
    /// # Errors
    ///
    /// Returns the error from `work`, or [`Error::LockTimeout`] / a storage
    /// error from opening or committing the transaction.
    pub fn with_unit_of_work<T, F>(&mut self, work: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let seconds = self.busy_timeout().as_secs().max(1);
        let tx = self.begin_unit_of_work()?;
        let value = work(&tx)?;
        tx.commit().map_err(|e| map_busy(e, seconds))?;
        Ok(value)
    }
}

/// Maps `SQLITE_BUSY`/`SQLITE_LOCKED` to [`Error::LockTimeout`].
pub(crate) fn map_busy(err: rusqlite::Error, seconds: u64) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            Error::LockTimeout { seconds }
        }
        other => Error::Storage(other),
    }
}
