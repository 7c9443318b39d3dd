//! Main entry point for the tablebook CLI.
//!
//! This is the command-line interface for the tablebook reservation core.
//! It provides commands for the table catalog and the reservation lifecycle:
//! - `reserve`: Book a table
//! - `status`, `reassign`, `cancel`, `check-in`: Move a reservation through its lifecycle
//! - `available`, `show`, `list`: Read the book
//! - `init`, `add-table`, `tables`: Manage the floor plan

use clap::Parser;
use tablebook_cli::cli::{Cli, Command};
use tablebook_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _ = tablebook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        format: cli.format,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::AddTable(cmd) => cmd.execute(&global),
        Command::Tables(cmd) => cmd.execute(&global),
        Command::Reserve(cmd) => cmd.execute(&global),
        Command::Status(cmd) => cmd.execute(&global),
        Command::Reassign(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::CheckIn(cmd) => cmd.execute(&global),
        Command::Available(cmd) => cmd.execute(&global),
        Command::Show(cmd) => cmd.execute(&global),
        Command::List(cmd) => cmd.execute(&global),
        Command::ShowConfig(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
