//! Request and response payloads for the booking operations.
//!
//! Field names match the JSON bodies the point-of-sale front end sends and
//! expects, so these types can be deserialized straight from a request body
//! and serialized straight into a response.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::BookingSettings;
use crate::customer::{ContactDetails, Customer};
use crate::error::Result;
use crate::reservation::{PartySize, Reservation, ReservationStatus};
use crate::slot::{self, BookingSlot};
use crate::store::ReservationFilter;
use crate::table::Table;

/// Longest accepted cancellation reason, in characters.
pub const MAX_CANCEL_REASON_LEN: usize = 500;

/// Body of a create-reservation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// Who is booking.
    pub customer: ContactDetails,
    /// What they are booking.
    pub reservation: ReservationDetails,
}

/// The booking half of a [`CreateReservationRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDetails {
    /// Number of guests; checked against 1-20.
    pub pax_number: i64,
    /// `YYYY-MM-DD`.
    pub reservation_date: String,
    /// `HH:MM`, 24-hour.
    pub reservation_time: String,
    /// A specific table; absent or `0` lets the allocator choose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl ReservationDetails {
    /// Returns the explicitly requested table, treating `0` as "auto-select".
    #[must_use]
    pub fn requested_table(&self) -> Option<i64> {
        self.table_id.filter(|&id| id != 0)
    }

    /// Validates the party size.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if it is outside 1-20.
    pub fn party_size(&self) -> Result<PartySize> {
        Ok(PartySize::try_from(self.pax_number)?)
    }

    /// Parses the requested slot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateFormat`] or
    /// [`crate::Error::InvalidTimeFormat`] on malformed input.
    pub fn slot(&self) -> Result<BookingSlot> {
        BookingSlot::parse(&self.reservation_date, &self.reservation_time)
    }
}

/// Body of an update-status call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status, one of `awaiting`, `confirmed`, `cancelled`, `completed`.
    pub status: String,
    /// Move the reservation to this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// Replace the notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateStatusRequest {
    /// A bare status change.
    #[must_use]
    pub fn to(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// Returns the requested table move, treating `0` as "no move".
    #[must_use]
    pub fn requested_table(&self) -> Option<i64> {
        self.table_id.filter(|&id| id != 0)
    }
}

/// Body of a reassign call: edits an active reservation without changing
/// its status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignRequest {
    /// Move the reservation to this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// Replace the notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReassignRequest {
    /// Returns the requested table move, treating `0` as "no move".
    #[must_use]
    pub fn requested_table(&self) -> Option<i64> {
        self.table_id.filter(|&id| id != 0)
    }

    /// Whether the request changes anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requested_table().is_none() && self.notes.is_none()
    }
}

/// Body of a cancel call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    /// Why the booking was cancelled; appended to the notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CancelRequest {
    /// Returns the trimmed reason, if one was given and it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if the reason is longer than
    /// [`MAX_CANCEL_REASON_LEN`] characters.
    pub fn validated_reason(&self) -> Result<Option<&str>> {
        let Some(reason) = self.reason.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if reason.chars().count() > MAX_CANCEL_REASON_LEN {
            return Err(crate::Error::Validation {
                field: "reason".into(),
                message: format!("must be at most {MAX_CANCEL_REASON_LEN} characters"),
            });
        }
        Ok(Some(reason).filter(|r| !r.is_empty()))
    }
}

/// Query for tables free at a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTablesQuery {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
    /// Number of guests.
    pub pax: i64,
}

/// Query for listing reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationQuery {
    /// Only this date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Only this status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Only this customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    /// Only this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

impl ReservationQuery {
    /// Resolves the effective `(page, per_page)` pair.
    ///
    /// A page below 1 becomes 1; a page size below 1 becomes the configured
    /// default, and one above the configured maximum is capped.
    #[must_use]
    pub fn page_bounds(&self, settings: &BookingSettings) -> (u32, u32) {
        let page = self
            .page
            .filter(|&p| p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1);
        let per_page = match self.per_page {
            Some(n) if n >= 1 => u32::try_from(n)
                .unwrap_or(u32::MAX)
                .min(settings.max_per_page),
            _ => settings.default_per_page,
        };
        (page, per_page)
    }

    /// Builds the storage filter for this query.
    ///
    /// Empty strings and zero ids mean "no filter on this field".
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateFormat`] or
    /// [`crate::Error::InvalidStatus`] if a filter value does not parse.
    pub fn to_filter(&self, settings: &BookingSettings) -> Result<ReservationFilter> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(slot::parse_date(raw)?),
        };
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ReservationStatus>()?),
        };
        let (page, per_page) = self.page_bounds(settings);
        Ok(ReservationFilter {
            date,
            status,
            customer_id: self.customer_id.filter(|&id| id != 0),
            table_id: self.table_id.filter(|&id| id != 0),
            limit: per_page,
            offset: u64::from(page - 1) * u64::from(per_page),
        })
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows on this page.
    pub items: Vec<T>,
    /// Matches across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wraps one page of `items`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(u64::from(per_page))
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

/// A reservation with its customer and table expanded, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    /// Storage id.
    pub id: i64,
    /// The booking customer.
    pub customer: Customer,
    /// The assigned table.
    pub table: Table,
    /// Number of guests.
    pub pax_number: u8,
    /// `YYYY-MM-DD`.
    pub reservation_date: NaiveDate,
    /// `HH:MM`.
    #[serde(with = "crate::slot::hhmm")]
    pub reservation_time: NaiveTime,
    /// Deposit in minor currency units.
    pub deposit_cents: i64,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// When the party was seated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<NaiveDateTime>,
    /// When the party left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_out_at: Option<NaiveDateTime>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-modified timestamp.
    pub updated_at: NaiveDateTime,
}

impl ReservationView {
    /// Joins a reservation with its customer and table.
    #[must_use]
    pub fn new(reservation: &Reservation, customer: Customer, table: Table) -> Self {
        let slot = reservation.slot();
        Self {
            id: reservation.id(),
            customer,
            table,
            pax_number: reservation.pax().value(),
            reservation_date: slot.date(),
            reservation_time: slot.time(),
            deposit_cents: reservation.deposit_cents(),
            status: reservation.status(),
            notes: reservation.notes().to_string(),
            checked_in_at: reservation.checked_in_at(),
            checked_out_at: reservation.checked_out_at(),
            created_at: reservation.created_at(),
            updated_at: reservation.updated_at(),
        }
    }
}
