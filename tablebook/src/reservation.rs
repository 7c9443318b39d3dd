//! Reservation types for tracking table bookings.
//!
//! This module provides the reservation lifecycle status, the validated
//! party-size newtype, and builder patterns for constructing reservations.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::slot::BookingSlot;

/// Lifecycle status of a reservation.
///
/// The legal edges are closed and fixed:
///
/// | From      | To                      |
/// |-----------|-------------------------|
/// | awaiting  | confirmed, cancelled    |
/// | confirmed | completed, cancelled    |
/// | cancelled | (terminal)              |
/// | completed | (terminal)              |
///
/// # Examples
///
/// ```
/// use tablebook::ReservationStatus;
///
/// let status: ReservationStatus = "awaiting".parse().unwrap();
/// assert!(status.can_transition_to(ReservationStatus::Confirmed));
/// assert!(!status.can_transition_to(ReservationStatus::Completed));
/// assert_eq!(status.to_string(), "awaiting");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Booked, not yet confirmed by the restaurant.
    Awaiting,
    /// Confirmed; the guests are expected.
    Confirmed,
    /// Cancelled before the visit.
    Cancelled,
    /// The visit took place and the table was released.
    Completed,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Awaiting,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Awaiting => "awaiting",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Returns the statuses reachable from `self` in one step.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Awaiting => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Completed, Self::Cancelled],
            Self::Cancelled | Self::Completed => &[],
        }
    }

    /// Returns `true` if `next` is a legal successor of `self`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Returns `true` for statuses that hold a table (awaiting, confirmed).
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Awaiting | Self::Confirmed)
    }

    /// Returns `true` for statuses with no outgoing edges.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// A validated party size (1-20 guests).
///
/// # Examples
///
/// ```
/// use tablebook::PartySize;
///
/// let pax = PartySize::try_from(4u32).unwrap();
/// assert_eq!(pax.value(), 4);
///
/// assert!(PartySize::try_from(0u32).is_err());
/// assert!(PartySize::try_from(21u32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PartySize(u8);

impl PartySize {
    /// The smallest party that can book.
    pub const MIN: u8 = 1;

    /// The largest party that can book.
    pub const MAX: u8 = 20;

    /// Returns the number of guests.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for PartySize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "pax_number".into(),
                message: format!(
                    "party size must be between {} and {}, got {value}",
                    Self::MIN,
                    Self::MAX
                ),
            })
    }
}

impl TryFrom<i64> for PartySize {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let narrowed = u32::try_from(value).map_err(|_| ValidationError {
            field: "pax_number".into(),
            message: format!(
                "party size must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ),
        })?;
        Self::try_from(narrowed)
    }
}

impl From<PartySize> for u32 {
    fn from(pax: PartySize) -> Self {
        Self::from(pax.0)
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored reservation.
///
/// Rows are read back from storage through [`Reservation::builder`]; the
/// lifecycle manager mutates them with the `set_*`/`mark_*` methods and
/// writes them back through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: i64,
    customer_id: i64,
    table_id: i64,
    pax: PartySize,
    slot: BookingSlot,
    deposit_cents: i64,
    status: ReservationStatus,
    notes: String,
    checked_in_at: Option<NaiveDateTime>,
    checked_out_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{BookingSlot, PartySize, Reservation, ReservationStatus};
    ///
    /// let slot = BookingSlot::parse("2025-06-01", "19:00").unwrap();
    /// let pax = PartySize::try_from(2u32).unwrap();
    /// let reservation = Reservation::builder(1, 3, pax, slot).id(10).build().unwrap();
    ///
    /// assert_eq!(reservation.id(), 10);
    /// assert_eq!(reservation.status(), ReservationStatus::Awaiting);
    /// ```
    #[must_use]
    pub fn builder(
        customer_id: i64,
        table_id: i64,
        pax: PartySize,
        slot: BookingSlot,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: 0,
            customer_id,
            table_id,
            pax,
            slot,
            deposit_cents: 0,
            status: ReservationStatus::Awaiting,
            notes: String::new(),
            checked_in_at: None,
            checked_out_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the storage id.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the id of the booking customer.
    #[must_use]
    pub const fn customer_id(&self) -> i64 {
        self.customer_id
    }

    /// Returns the id of the assigned table.
    #[must_use]
    pub const fn table_id(&self) -> i64 {
        self.table_id
    }

    /// Returns the party size.
    #[must_use]
    pub const fn pax(&self) -> PartySize {
        self.pax
    }

    /// Returns the booked slot.
    #[must_use]
    pub const fn slot(&self) -> BookingSlot {
        self.slot
    }

    /// Returns the deposit in minor currency units.
    #[must_use]
    pub const fn deposit_cents(&self) -> i64 {
        self.deposit_cents
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the free-text notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns when the party was seated, if it has been.
    #[must_use]
    pub const fn checked_in_at(&self) -> Option<NaiveDateTime> {
        self.checked_in_at
    }

    /// Returns when the party left, if the reservation is completed.
    #[must_use]
    pub const fn checked_out_at(&self) -> Option<NaiveDateTime> {
        self.checked_out_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Returns the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Returns `true` while the reservation holds its table.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Sets the status without checking the transition table.
    ///
    /// Callers are expected to have checked [`ReservationStatus::can_transition_to`].
    pub fn set_status(&mut self, status: ReservationStatus) {
        self.status = status;
    }

    /// Moves the reservation to another table.
    pub fn set_table_id(&mut self, table_id: i64) {
        self.table_id = table_id;
    }

    /// Replaces the notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Appends a line to the notes, without a leading newline if they were empty.
    pub fn append_note(&mut self, line: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(line);
    }

    /// Records the check-in time.
    pub fn mark_checked_in(&mut self, at: NaiveDateTime) {
        self.checked_in_at = Some(at);
    }

    /// Records the check-out time.
    pub fn mark_checked_out(&mut self, at: NaiveDateTime) {
        self.checked_out_at = Some(at);
    }

    /// Sets the last-modified timestamp.
    pub fn touch(&mut self, at: NaiveDateTime) {
        self.updated_at = at;
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: i64,
    customer_id: i64,
    table_id: i64,
    pax: PartySize,
    slot: BookingSlot,
    deposit_cents: i64,
    status: ReservationStatus,
    notes: String,
    checked_in_at: Option<NaiveDateTime>,
    checked_out_at: Option<NaiveDateTime>,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl ReservationBuilder {
    /// Sets the storage id.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the deposit in minor currency units.
    #[must_use]
    pub const fn deposit_cents(mut self, cents: i64) -> Self {
        self.deposit_cents = cents;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the check-in timestamp.
    #[must_use]
    pub const fn checked_in_at(mut self, at: Option<NaiveDateTime>) -> Self {
        self.checked_in_at = at;
        self
    }

    /// Sets the check-out timestamp.
    #[must_use]
    pub const fn checked_out_at(mut self, at: Option<NaiveDateTime>) -> Self {
        self.checked_out_at = at;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Sets the last-modified timestamp.
    #[must_use]
    pub const fn updated_at(mut self, at: NaiveDateTime) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The deposit is negative
    /// - The reservation is checked out but was never checked in, or was
    ///   checked out before it was checked in
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.deposit_cents < 0 {
            return Err(ValidationError {
                field: "deposit_cents".into(),
                message: "deposit must not be negative".into(),
            });
        }

        if let Some(out) = self.checked_out_at {
            match self.checked_in_at {
                Some(at) if out < at => {
                    return Err(ValidationError {
                        field: "checked_out_at".into(),
                        message: "check-out must not precede check-in".into(),
                    });
                }
                _ => {}
            }
        }

        let now = Local::now().naive_local();
        let created_at = self.created_at.unwrap_or(now);
        Ok(Reservation {
            id: self.id,
            customer_id: self.customer_id,
            table_id: self.table_id,
            pax: self.pax,
            slot: self.slot,
            deposit_cents: self.deposit_cents,
            status: self.status,
            notes: self.notes,
            checked_in_at: self.checked_in_at,
            checked_out_at: self.checked_out_at,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        })
    }
}

/// Insert payload for a new reservation.
///
/// New reservations always start out `awaiting`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The booking customer.
    pub customer_id: i64,
    /// The allocated table.
    pub table_id: i64,
    /// The party size.
    pub pax: PartySize,
    /// The booked slot.
    pub slot: BookingSlot,
    /// Free-text notes.
    pub notes: String,
    /// Deposit in minor currency units.
    pub deposit_cents: i64,
    /// Creation timestamp, taken from the injected clock.
    pub created_at: NaiveDateTime,
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot() -> BookingSlot {
        BookingSlot::parse("2025-06-01", "19:00").unwrap()
    }

    fn pax(n: u32) -> PartySize {
        PartySize::try_from(n).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ReservationStatus::ALL {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        for bad in ["done", "Awaiting", "", "checked_in"] {
            assert!(matches!(
                bad.parse::<ReservationStatus>(),
                Err(Error::InvalidStatus { .. })
            ));
        }
    }

    #[test]
    fn test_transition_table() {
        use ReservationStatus::{Awaiting, Cancelled, Completed, Confirmed};

        assert!(Awaiting.can_transition_to(Confirmed));
        assert!(Awaiting.can_transition_to(Cancelled));
        assert!(!Awaiting.can_transition_to(Completed));
        assert!(!Awaiting.can_transition_to(Awaiting));

        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Awaiting));

        assert!(Cancelled.allowed_transitions().is_empty());
        assert!(Completed.allowed_transitions().is_empty());
    }

    #[test]
    fn test_active_and_terminal_partition() {
        for status in ReservationStatus::ALL {
            assert_ne!(status.is_active(), status.is_terminal());
        }
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&ReservationStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let parsed: ReservationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_party_size_bounds() {
        assert!(PartySize::try_from(0u32).is_err());
        assert_eq!(PartySize::try_from(1u32).unwrap().value(), 1);
        assert_eq!(PartySize::try_from(20u32).unwrap().value(), 20);
        assert!(PartySize::try_from(21u32).is_err());
        assert!(PartySize::try_from(300u32).is_err());
        assert!(PartySize::try_from(-1i64).is_err());
    }

    #[test]
    fn test_party_size_error_names_field() {
        let err = PartySize::try_from(0u32).unwrap_err();
        assert_eq!(err.field, "pax_number");
    }

    #[test]
    fn test_party_size_deserialize_validates() {
        assert!(serde_json::from_str::<PartySize>("4").is_ok());
        assert!(serde_json::from_str::<PartySize>("0").is_err());
        assert!(serde_json::from_str::<PartySize>("25").is_err());
    }

    #[test]
    fn test_reservation_builder_defaults() {
        let reservation = Reservation::builder(1, 2, pax(4), slot()).build().unwrap();

        assert_eq!(reservation.customer_id(), 1);
        assert_eq!(reservation.table_id(), 2);
        assert_eq!(reservation.pax().value(), 4);
        assert_eq!(reservation.status(), ReservationStatus::Awaiting);
        assert_eq!(reservation.deposit_cents(), 0);
        assert_eq!(reservation.notes(), "");
        assert!(reservation.checked_in_at().is_none());
        assert_eq!(reservation.created_at(), reservation.updated_at());
    }

    #[test]
    fn test_reservation_builder_rejects_negative_deposit() {
        let err = Reservation::builder(1, 2, pax(2), slot())
            .deposit_cents(-1)
            .build()
            .unwrap_err();
        assert_eq!(err.field, "deposit_cents");
    }

    #[test]
    fn test_reservation_builder_rejects_checkout_before_checkin() {
        let err = Reservation::builder(1, 2, pax(2), slot())
            .checked_in_at(Some(at(19, 0)))
            .checked_out_at(Some(at(18, 0)))
            .build()
            .unwrap_err();
        assert_eq!(err.field, "checked_out_at");
    }

    #[test]
    fn test_append_note() {
        let mut reservation = Reservation::builder(1, 2, pax(2), slot()).build().unwrap();
        reservation.append_note("Cancellation reason: rain");
        assert_eq!(reservation.notes(), "Cancellation reason: rain");

        let mut reservation = Reservation::builder(1, 2, pax(2), slot())
            .notes("window seat")
            .build()
            .unwrap();
        reservation.append_note("Cancellation reason: rain");
        assert_eq!(reservation.notes(), "window seat\nCancellation reason: rain");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("first_name", "must be at least 2 characters");
        let display = format!("{err}");
        assert!(display.contains("first_name"));
        assert!(display.contains("at least 2"));
    }
}
