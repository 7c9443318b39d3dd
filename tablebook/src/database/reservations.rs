//! Reservation rows.

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::reservation::{NewReservation, PartySize, Reservation, ReservationStatus};
use crate::slot::{self, BookingSlot, DATE_FORMAT};
use crate::store::{ReservationFilter, ReservationStore};

use super::schema::{COUNT_CONFLICTS, RESERVATION_COLUMNS};
use super::store::{
    conversion_error, datetime_to_secs, map_conflict, secs_to_datetime, SqliteStore,
};

/// Expects row fields in [`RESERVATION_COLUMNS`] order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let pax: i64 = row.get(3)?;
    let pax = PartySize::try_from(pax).map_err(conversion_error)?;

    let date: String = row.get(4)?;
    let date = slot::parse_date(&date).map_err(conversion_error)?;
    let minute: i64 = row.get(5)?;
    let time = slot::time_from_minute_of_day(minute)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(5, minute))?;

    let status: String = row.get(7)?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(conversion_error)?;

    let checked_in_at: Option<i64> = row.get(9)?;
    let checked_out_at: Option<i64> = row.get(10)?;

    Reservation::builder(row.get(1)?, row.get(2)?, pax, BookingSlot::new(date, time))
        .id(row.get(0)?)
        .deposit_cents(row.get(6)?)
        .status(status)
        .notes(row.get::<_, String>(8)?)
        .checked_in_at(checked_in_at.map(secs_to_datetime).transpose()?)
        .checked_out_at(checked_out_at.map(secs_to_datetime).transpose()?)
        .created_at(secs_to_datetime(row.get(11)?)?)
        .updated_at(secs_to_datetime(row.get(12)?)?)
        .build()
        .map_err(conversion_error)
}

fn date_param(slot: &BookingSlot) -> String {
    slot.date().format(DATE_FORMAT).to_string()
}

/// Builds the WHERE clause and its parameters for a filter.
fn filter_clause(filter: &ReservationFilter) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(date) = filter.date {
        conditions.push("reservation_date = ?");
        values.push(Value::Text(date.format(DATE_FORMAT).to_string()));
    }
    if let Some(status) = filter.status {
        conditions.push("status = ?");
        values.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(customer_id) = filter.customer_id {
        conditions.push("customer_id = ?");
        values.push(Value::Integer(customer_id));
    }
    if let Some(table_id) = filter.table_id {
        conditions.push("table_id = ?");
        values.push(Value::Integer(table_id));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    (clause, values)
}

impl ReservationStore for SqliteStore {
    fn create_reservation(
        &self,
        conn: &Connection,
        reservation: &NewReservation,
    ) -> Result<Reservation> {
        let created = datetime_to_secs(reservation.created_at);
        conn.execute(
            "INSERT INTO reservations (customer_id, table_id, pax, reservation_date, \
             reservation_minute, deposit_cents, status, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                reservation.customer_id,
                reservation.table_id,
                reservation.pax.value(),
                date_param(&reservation.slot),
                reservation.slot.minute_of_day(),
                reservation.deposit_cents,
                ReservationStatus::Awaiting.as_str(),
                reservation.notes,
                created,
                created,
            ],
        )
        .map_err(|e| map_conflict(e, reservation.table_id, &reservation.slot))?;

        let id = conn.last_insert_rowid();
        self.find_reservation_by_id(conn, id)?
            .ok_or(Error::ReservationNotFound { id })
    }

    fn find_reservation_by_id(&self, conn: &Connection, id: i64) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, params![id], row_to_reservation)
            .optional()?)
    }

    fn find_all(
        &self,
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<(Vec<Reservation>, u64)> {
        let (clause, mut values) = filter_clause(filter);

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM reservations{clause}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations{clause} \
             ORDER BY reservation_date DESC, reservation_minute DESC, id DESC \
             LIMIT ? OFFSET ?"
        );
        values.push(Value::Integer(i64::from(filter.limit)));
        values.push(Value::Integer(
            i64::try_from(filter.offset).unwrap_or(i64::MAX),
        ));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, u64::try_from(total).unwrap_or(0)))
    }

    fn update_reservation(&self, conn: &Connection, reservation: &Reservation) -> Result<()> {
        let slot = reservation.slot();
        let rows = conn
            .execute(
                "UPDATE reservations SET table_id = ?, pax = ?, reservation_date = ?, \
                 reservation_minute = ?, deposit_cents = ?, status = ?, notes = ?, \
                 checked_in_at = ?, checked_out_at = ?, updated_at = ? WHERE id = ?",
                params![
                    reservation.table_id(),
                    reservation.pax().value(),
                    date_param(&slot),
                    slot.minute_of_day(),
                    reservation.deposit_cents(),
                    reservation.status().as_str(),
                    reservation.notes(),
                    reservation.checked_in_at().map(datetime_to_secs),
                    reservation.checked_out_at().map(datetime_to_secs),
                    datetime_to_secs(reservation.updated_at()),
                    reservation.id(),
                ],
            )
            .map_err(|e| map_conflict(e, reservation.table_id(), &slot))?;
        if rows == 0 {
            return Err(Error::ReservationNotFound {
                id: reservation.id(),
            });
        }
        Ok(())
    }

    fn update_reservation_status(
        &self,
        conn: &Connection,
        id: i64,
        status: ReservationStatus,
        at: NaiveDateTime,
    ) -> Result<()> {
        let rows = conn.execute(
            "UPDATE reservations SET status = ?, updated_at = ? WHERE id = ?",
            params![status.as_str(), datetime_to_secs(at), id],
        )?;
        if rows == 0 {
            return Err(Error::ReservationNotFound { id });
        }
        Ok(())
    }

    fn is_table_available(
        &self,
        conn: &Connection,
        table_id: i64,
        slot: &BookingSlot,
        exclude: Option<i64>,
    ) -> Result<bool> {
        let conflicts: i64 = conn.query_row(
            COUNT_CONFLICTS,
            params![table_id, date_param(slot), slot.minute_of_day(), exclude],
            |row| row.get(0),
        )?;
        Ok(conflicts == 0)
    }
}
