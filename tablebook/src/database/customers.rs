//! Customer rows.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::customer::{Customer, CustomerTitle, NewCustomer};
use crate::error::Result;
use crate::store::CustomerStore;

use super::schema::CUSTOMER_COLUMNS;
use super::store::{conversion_error, datetime_to_secs, secs_to_datetime, SqliteStore};

/// Expects row fields in [`CUSTOMER_COLUMNS`] order.
fn row_to_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    let title: Option<String> = row.get(1)?;
    let title = title
        .map(|t| t.parse::<CustomerTitle>())
        .transpose()
        .map_err(conversion_error)?;

    Ok(Customer {
        id: row.get(0)?,
        title,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        created_at: secs_to_datetime(row.get(6)?)?,
        updated_at: secs_to_datetime(row.get(7)?)?,
    })
}

impl CustomerStore for SqliteStore {
    fn find_by_phone(&self, conn: &Connection, phone: &str) -> Result<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE phone = ?");
        Ok(conn
            .query_row(&sql, params![phone], row_to_customer)
            .optional()?)
    }

    fn find_customer_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?");
        Ok(conn.query_row(&sql, params![id], row_to_customer).optional()?)
    }

    fn create_customer(
        &self,
        conn: &Connection,
        customer: &NewCustomer,
        at: NaiveDateTime,
    ) -> Result<Customer> {
        let now = datetime_to_secs(at);
        conn.execute(
            "INSERT INTO customers (title, first_name, last_name, phone, email, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                customer.title.map(CustomerTitle::as_str),
                customer.first_name,
                customer.last_name,
                customer.phone,
                customer.email,
                now,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("created customer {id} for phone {}", customer.phone);

        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?");
        Ok(conn.query_row(&sql, params![id], row_to_customer)?)
    }
}
