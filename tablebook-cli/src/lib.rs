//! Library exports for tablebook-cli.
//!
//! The binary in `main.rs` drives these modules; exposing them lets the
//! command tree be inspected from tests and tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
