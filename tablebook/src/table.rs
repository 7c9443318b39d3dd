//! Dining tables and their occupancy status.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Occupancy status of a table.
///
/// Mirrors the reservation holding it: `reserved` while an awaiting or
/// confirmed booking has not been seated, `occupied` once it has, and
/// `available` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Free to book.
    Available,
    /// Guests are seated.
    Occupied,
    /// Held by an upcoming reservation.
    Reserved,
}

impl TableStatus {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "reserved" => Ok(Self::Reserved),
            other => Err(ValidationError::new(
                "status",
                format!("unknown table status '{other}'"),
            )),
        }
    }
}

/// A stored dining table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Storage id.
    pub id: i64,
    /// Human-facing label, unique across tables (e.g. `T04`).
    pub table_number: String,
    /// Seats at the table.
    pub capacity: u32,
    /// Current occupancy status.
    pub status: TableStatus,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-modified timestamp.
    pub updated_at: NaiveDateTime,
}

impl Table {
    /// Returns `true` if the table seats at least `pax` guests.
    #[must_use]
    pub fn seats(&self, pax: u32) -> bool {
        self.capacity >= pax
    }
}

/// Insert payload for a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    table_number: String,
    capacity: u32,
}

impl NewTable {
    /// Longest accepted table number.
    pub const MAX_NUMBER_LEN: usize = 32;

    /// Largest accepted capacity.
    pub const MAX_CAPACITY: u32 = 20;

    /// Validates a new table.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is empty or longer than
    /// [`Self::MAX_NUMBER_LEN`], or the capacity is outside `1..=20`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::NewTable;
    ///
    /// assert!(NewTable::new("T01", 4).is_ok());
    /// assert!(NewTable::new("", 4).is_err());
    /// assert!(NewTable::new("T02", 0).is_err());
    /// assert!(NewTable::new("T03", 21).is_err());
    /// ```
    pub fn new(table_number: impl Into<String>, capacity: u32) -> Result<Self, ValidationError> {
        let table_number = table_number.into().trim().to_string();
        if table_number.is_empty() {
            return Err(ValidationError::new("table_number", "is required"));
        }
        if table_number.chars().count() > Self::MAX_NUMBER_LEN {
            return Err(ValidationError::new(
                "table_number",
                format!("must be at most {} characters", Self::MAX_NUMBER_LEN),
            ));
        }
        if !(1..=Self::MAX_CAPACITY).contains(&capacity) {
            return Err(ValidationError::new(
                "capacity",
                format!("must be between 1 and {}, got {capacity}", Self::MAX_CAPACITY),
            ));
        }
        Ok(Self {
            table_number,
            capacity,
        })
    }

    /// Returns the table number.
    #[must_use]
    pub fn table_number(&self) -> &str {
        &self.table_number
    }

    /// Returns the capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }
}
