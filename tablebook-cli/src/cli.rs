//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddTableCommand, AvailableCommand, CancelCommand, CheckInCommand, CompletionsCommand,
    InitCommand, ListCommand, ReassignCommand, ReserveCommand, ShowCommand, ShowConfigCommand,
    StatusCommand, TablesCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tablebook::config::OutputFormat;

/// Restaurant table reservations from the command line.
#[derive(Parser)]
#[command(name = "tablebook")]
#[command(version, about = "Book restaurant tables and manage reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "TABLEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "TABLEBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    /// Output format: table, json, csv or tsv
    #[arg(long, value_name = "FORMAT", global = true, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the data directory and database, and load the floor plan
    Init(InitCommand),

    /// Add a table to the floor plan
    AddTable(AddTableCommand),

    /// List tables
    Tables(TablesCommand),

    /// Book a table
    Reserve(ReserveCommand),

    /// Change a reservation's status, table or notes
    Status(StatusCommand),

    /// Move a reservation or replace its notes, keeping its status
    Reassign(ReassignCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Seat a confirmed party
    CheckIn(CheckInCommand),

    /// List tables free for a slot
    Available(AvailableCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Print the effective configuration
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
