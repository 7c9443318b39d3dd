#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tablebook
//!
//! Reservation booking and table allocation for a restaurant point of sale.
//!
//! The library resolves customers by phone number, picks a table that seats
//! the party without colliding with another booking inside the two-hour
//! turnover window, stores the reservation and keeps table occupancy in
//! step, all inside one SQLite transaction. Reservations then move through
//! a closed lifecycle: awaiting, confirmed, and finally cancelled or
//! completed.
//!
//! ## Core Types
//!
//! - [`ReservationManager`]: create, update status, cancel, check in, list
//! - [`BookingSlot`]: a date and minute-precision time, with the conflict window
//! - [`Reservation`], [`ReservationStatus`] and [`PartySize`]
//! - [`Database`]: the SQLite connection and its units of work
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use tablebook::{BookingSlot, PartySize, ReservationStatus};
//!
//! let pax = PartySize::try_from(4u32).unwrap();
//! assert_eq!(pax.value(), 4);
//!
//! let dinner = BookingSlot::parse("2025-12-25", "19:00").unwrap();
//! let late = BookingSlot::parse("2025-12-25", "21:00").unwrap();
//! assert_eq!(late.minute_of_day() - dinner.minute_of_day(), 120);
//!
//! assert!(ReservationStatus::Awaiting.can_transition_to(ReservationStatus::Confirmed));
//! ```

pub mod booking;
pub mod clock;
pub mod config;
pub mod customer;
pub mod database;
pub mod error;
pub mod logging;
pub mod request;
pub mod reservation;
pub mod slot;
pub mod store;
pub mod table;

// Re-export key types at crate root for convenience
pub use booking::{BookingSettings, ReservationManager, TableCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigBuilder};
pub use customer::{ContactDetails, Customer, CustomerTitle};
pub use database::{Database, DatabaseConfig, SqliteStore};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use request::{
    AvailableTablesQuery, CancelRequest, CreateReservationRequest, Page, ReassignRequest,
    ReservationDetails, ReservationQuery, ReservationView, UpdateStatusRequest,
};
pub use reservation::{PartySize, Reservation, ReservationStatus};
pub use slot::BookingSlot;
pub use table::{NewTable, Table, TableStatus};
