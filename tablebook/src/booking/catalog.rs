//! The table catalog: adding tables and seeding the configured floor plan.

use rusqlite::Connection;

use crate::clock::{Clock, SystemClock};
use crate::config::FloorPlanTable;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::store::TableStore;
use crate::table::{NewTable, Table};

/// Table catalog operations over a [`TableStore`].
///
/// New tables are stamped with the catalog's clock, the system clock unless
/// [`TableCatalog::with_clock`] swaps it.
#[derive(Debug)]
pub struct TableCatalog<'a, S: TableStore + ?Sized, K = SystemClock> {
    store: &'a S,
    clock: K,
}

impl<'a, S: TableStore + ?Sized> TableCatalog<'a, S> {
    /// Creates a catalog over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<'a, S: TableStore + ?Sized, K: Clock> TableCatalog<'a, S, K> {
    /// Uses `clock` for creation timestamps.
    #[must_use]
    pub fn with_clock<C: Clock>(self, clock: C) -> TableCatalog<'a, S, C> {
        TableCatalog {
            store: self.store,
            clock,
        }
    }

    /// Adds an `available` table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the number is already taken, or a
    /// storage error.
    pub fn add(&self, conn: &Connection, table: &NewTable) -> Result<Table> {
        if self
            .store
            .find_by_number(conn, table.table_number())?
            .is_some()
        {
            return Err(duplicate_number(table.table_number()));
        }
        let created = self.store.create_table(conn, table, self.clock.now())?;
        log::info!(
            "added table {} ({} seats)",
            created.table_number,
            created.capacity
        );
        Ok(created)
    }

    /// Lists every table by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, conn: &Connection) -> Result<Vec<Table>> {
        self.store.list_tables(conn)
    }

    /// Adds every floor-plan table whose number is not yet present.
    ///
    /// Runs as one unit of work; existing tables are left untouched even if
    /// the configured capacity differs. Returns the tables that were added.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed entry (nothing is added),
    /// [`Error::LockTimeout`], or a storage error.
    pub fn sync_floor_plan(&self, db: &mut Database, plan: &[FloorPlanTable]) -> Result<Vec<Table>> {
        let entries = plan
            .iter()
            .map(|entry| NewTable::new(entry.number.as_str(), entry.capacity))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let now = self.clock.now();
        let added = db.with_unit_of_work(|tx| {
            let mut added = Vec::new();
            for entry in &entries {
                if self.store.find_by_number(tx, entry.table_number())?.is_none() {
                    added.push(self.store.create_table(tx, entry, now)?);
                }
            }
            Ok(added)
        })?;

        if !added.is_empty() {
            log::info!("floor plan sync added {} table(s)", added.len());
        }
        Ok(added)
    }
}

fn duplicate_number(number: &str) -> Error {
    Error::Validation {
        field: "table_number".into(),
        message: format!("table number '{number}' already exists"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::database::test_util::{create_test_database, test_now};
    use crate::database::SqliteStore;
    use crate::table::TableStatus;

    fn plan(entries: &[(&str, u32)]) -> Vec<FloorPlanTable> {
        entries
            .iter()
            .map(|(number, capacity)| FloorPlanTable {
                number: (*number).to_string(),
                capacity: *capacity,
            })
            .collect()
    }

    #[test]
    fn test_add_creates_available_table() {
        let db = create_test_database();
        let table = TableCatalog::new(&SqliteStore)
            .add(db.connection(), &NewTable::new("T01", 4).unwrap())
            .unwrap();
        assert_eq!(table.table_number, "T01");
        assert_eq!(table.status, TableStatus::Available);
    }

    #[test]
    fn test_add_rejects_duplicate_number() {
        let db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore);
        catalog
            .add(db.connection(), &NewTable::new("T01", 4).unwrap())
            .unwrap();

        let err = catalog
            .add(db.connection(), &NewTable::new("T01", 6).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "table_number"));
    }

    #[test]
    fn test_list_orders_by_number() {
        let db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore);
        for number in ["T03", "T01", "T02"] {
            catalog
                .add(db.connection(), &NewTable::new(number, 2).unwrap())
                .unwrap();
        }
        let numbers: Vec<String> = catalog
            .list(db.connection())
            .unwrap()
            .into_iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(numbers, vec!["T01", "T02", "T03"]);
    }

    #[test]
    fn test_sync_adds_only_missing_tables() {
        let mut db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore);
        catalog
            .add(db.connection(), &NewTable::new("T01", 2).unwrap())
            .unwrap();

        let added = catalog
            .sync_floor_plan(&mut db, &plan(&[("T01", 8), ("T02", 4)]))
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].table_number, "T02");

        let existing = SqliteStore
            .find_by_number(db.connection(), "T01")
            .unwrap()
            .unwrap();
        assert_eq!(existing.capacity, 2);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore);
        let floor = plan(&[("T01", 2), ("T02", 4)]);

        assert_eq!(catalog.sync_floor_plan(&mut db, &floor).unwrap().len(), 2);
        assert!(catalog.sync_floor_plan(&mut db, &floor).unwrap().is_empty());
    }

    #[test]
    fn test_sync_invalid_entry_adds_nothing() {
        let mut db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore);

        let err = catalog
            .sync_floor_plan(&mut db, &plan(&[("T01", 2), ("T02", 0)]))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(catalog.list(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_tables_are_stamped_by_the_catalog_clock() {
        let mut db = create_test_database();
        let catalog = TableCatalog::new(&SqliteStore).with_clock(FixedClock::new(test_now()));

        let added = catalog
            .add(db.connection(), &NewTable::new("T01", 2).unwrap())
            .unwrap();
        assert_eq!(added.created_at, test_now());

        let synced = catalog
            .sync_floor_plan(&mut db, &plan(&[("T02", 4)]))
            .unwrap();
        assert_eq!(synced[0].created_at, test_now());
        assert_eq!(synced[0].updated_at, test_now());
    }
}
