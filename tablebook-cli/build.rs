//! Build script for tablebook-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! outline is restated here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command outline for man page generation.
///
/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("tablebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book restaurant tables and manage reservations")
        .long_about(
            "Command-line front end for the tablebook reservation core: customer \
             lookup by phone, table allocation with a two-hour turnover window, \
             and the awaiting/confirmed/cancelled/completed lifecycle",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("TABLEBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("TABLEBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format: table, json, csv or tsv")
                .value_name("FORMAT")
                .global(true),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Create the data directory and database, and load the floor plan"),
            Command::new("add-table").about("Add a table to the floor plan"),
            Command::new("tables").about("List tables"),
            Command::new("reserve")
                .about("Book a table")
                .long_about("Book a table from a JSON request or from individual flags"),
            Command::new("status").about("Change a reservation's status, table or notes"),
            Command::new("cancel").about("Cancel a reservation"),
            Command::new("check-in").about("Seat a confirmed party"),
            Command::new("available").about("List tables free for a slot"),
            Command::new("show").about("Show one reservation"),
            Command::new("list").about("List reservations"),
            Command::new("show-config").about("Print the effective configuration"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("tablebook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
