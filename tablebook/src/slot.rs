//! Booking slots: the calendar date and time of day a reservation starts at.
//!
//! Reservations store the date and the time of day independently. Two
//! active reservations on the same table and date conflict when their
//! start times lie strictly less than [`CONFLICT_WINDOW_MINUTES`] apart.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Width of the turnover window, in minutes, on either side of a booking.
pub const CONFLICT_WINDOW_MINUTES: i64 = 120;

/// Minimum lead time, in minutes, between now and a new reservation.
pub const MIN_LEAD_MINUTES: i64 = 60;

/// Wire format for reservation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for reservation times.
pub const TIME_FORMAT: &str = "%H:%M";

/// The date and time of day a reservation starts at.
///
/// Times are kept at minute precision; seconds are dropped on construction.
///
/// # Examples
///
/// ```
/// use tablebook::BookingSlot;
///
/// let slot = BookingSlot::parse("2025-06-01", "18:30").unwrap();
/// assert_eq!(slot.minute_of_day(), 18 * 60 + 30);
/// assert_eq!(slot.to_string(), "2025-06-01 18:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingSlot {
    date: NaiveDate,
    time: NaiveTime,
}

impl BookingSlot {
    /// Creates a slot from already-parsed parts.
    #[must_use]
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        let time = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time);
        Self { date, time }
    }

    /// Parses a slot from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateFormat`] if `date` is not `YYYY-MM-DD`,
    /// or [`Error::InvalidTimeFormat`] if `time` is not a 24-hour `HH:MM`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{BookingSlot, Error};
    ///
    /// assert!(BookingSlot::parse("2025-06-01", "18:30").is_ok());
    /// assert!(matches!(
    ///     BookingSlot::parse("01/06/2025", "18:30"),
    ///     Err(Error::InvalidDateFormat { .. })
    /// ));
    /// assert!(matches!(
    ///     BookingSlot::parse("2025-06-01", "6:30pm"),
    ///     Err(Error::InvalidTimeFormat { .. })
    /// ));
    /// ```
    pub fn parse(date: &str, time: &str) -> Result<Self> {
        Ok(Self::new(parse_date(date)?, parse_time(time)?))
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time of day.
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the time of day as minutes since midnight.
    #[must_use]
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.time.hour()) * 60 + i64::from(self.time.minute())
    }

    /// Returns the combined start of the slot.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Checks that the slot starts at least [`MIN_LEAD_MINUTES`] after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReservationTime`] if the slot is too soon or in the past.
    pub fn ensure_bookable_at(&self, now: NaiveDateTime) -> Result<()> {
        let earliest = now + Duration::minutes(MIN_LEAD_MINUTES);
        let requested = self.starts_at();
        if requested < earliest {
            return Err(Error::InvalidReservationTime {
                requested,
                earliest,
            });
        }
        Ok(())
    }
}

impl fmt::Display for BookingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDateFormat`] on malformed input.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDateFormat {
        value: value.to_string(),
    })
}

/// Parses a 24-hour `HH:MM` time.
///
/// # Errors
///
/// Returns [`Error::InvalidTimeFormat`] on malformed input.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| Error::InvalidTimeFormat {
        value: value.to_string(),
    })
}

/// Converts minutes since midnight back into a time of day.
pub(crate) fn time_from_minute_of_day(minutes: i64) -> Option<NaiveTime> {
    let minutes = u32::try_from(minutes).ok()?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Serde helpers for `HH:MM` time fields.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    /// Serializes a time as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    /// Deserializes a time from `HH:MM`.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error on malformed input.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
