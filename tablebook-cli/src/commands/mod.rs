//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the database and load the configured floor plan
//! - `add_table`: Add one table
//! - `tables`: List tables
//! - `reserve`: Book a table
//! - `status`: Change a reservation's status, table or notes
//! - `reassign`: Move a reservation or replace its notes, keeping its status
//! - `cancel`: Cancel a reservation
//! - `check_in`: Seat a confirmed party
//! - `available`: List tables free for a slot
//! - `show`: Show one reservation
//! - `list`: List reservations
//! - `show_config`: Print the effective configuration
//! - `completions`: Generate shell completion scripts

pub mod add_table;
pub mod available;
pub mod cancel;
pub mod check_in;
pub mod completions;
pub mod init;
pub mod list;
pub mod reassign;
pub mod reserve;
pub mod show;
pub mod show_config;
pub mod status;
pub mod tables;

pub use add_table::AddTableCommand;
pub use available::AvailableCommand;
pub use cancel::CancelCommand;
pub use check_in::CheckInCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reassign::ReassignCommand;
pub use reserve::ReserveCommand;
pub use show::ShowCommand;
pub use show_config::ShowConfigCommand;
pub use status::StatusCommand;
pub use tables::TablesCommand;
