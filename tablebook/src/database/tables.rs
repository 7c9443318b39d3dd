//! Dining table rows.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::store::TableStore;
use crate::table::{NewTable, Table, TableStatus};

use super::schema::TABLE_COLUMNS;
use super::store::{
    conversion_error, datetime_to_secs, is_unique_violation, secs_to_datetime, SqliteStore,
};

/// Expects row fields in [`TABLE_COLUMNS`] order.
fn row_to_table(row: &rusqlite::Row<'_>) -> rusqlite::Result<Table> {
    let status: String = row.get(3)?;
    Ok(Table {
        id: row.get(0)?,
        table_number: row.get(1)?,
        capacity: row.get(2)?,
        status: status.parse::<TableStatus>().map_err(conversion_error)?,
        created_at: secs_to_datetime(row.get(4)?)?,
        updated_at: secs_to_datetime(row.get(5)?)?,
    })
}

fn query_tables(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Table>> {
    let mut stmt = conn.prepare(sql)?;
    let tables = stmt
        .query_map(params, row_to_table)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tables)
}

impl TableStore for SqliteStore {
    fn find_table_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?");
        Ok(conn.query_row(&sql, params![id], row_to_table).optional()?)
    }

    fn find_by_number(&self, conn: &Connection, table_number: &str) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE table_number = ?");
        Ok(conn
            .query_row(&sql, params![table_number], row_to_table)
            .optional()?)
    }

    fn find_by_capacity_at_least(&self, conn: &Connection, pax: u32) -> Result<Vec<Table>> {
        let sql = format!(
            "SELECT {TABLE_COLUMNS} FROM dining_tables WHERE capacity >= ? ORDER BY capacity ASC, id ASC"
        );
        query_tables(conn, &sql, params![pax])
    }

    fn list_tables(&self, conn: &Connection) -> Result<Vec<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables ORDER BY table_number ASC");
        query_tables(conn, &sql, [])
    }

    fn create_table(&self, conn: &Connection, table: &NewTable, at: NaiveDateTime) -> Result<Table> {
        let now = datetime_to_secs(at);
        conn.execute(
            "INSERT INTO dining_tables (table_number, capacity, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
            params![
                table.table_number(),
                table.capacity(),
                TableStatus::Available.as_str(),
                now,
                now,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Validation {
                    field: "table_number".into(),
                    message: format!("table '{}' already exists", table.table_number()),
                }
            } else {
                Error::Storage(e)
            }
        })?;
        let id = conn.last_insert_rowid();

        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?");
        Ok(conn.query_row(&sql, params![id], row_to_table)?)
    }

    fn update_table_status(
        &self,
        conn: &Connection,
        id: i64,
        status: TableStatus,
        at: NaiveDateTime,
    ) -> Result<()> {
        let rows = conn.execute(
            "UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ?",
            params![status.as_str(), datetime_to_secs(at), id],
        )?;
        if rows == 0 {
            return Err(Error::TableNotFound { table_id: id });
        }
        Ok(())
    }
}
