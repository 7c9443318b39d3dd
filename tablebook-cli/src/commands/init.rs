//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the tablebook data directory and database, and seeding the floor plan
//! from configuration.

use crate::error::CliError;
use crate::utils::{
    data_dir, database_config, load_configuration, shorten_path, sync_floor_plan, GlobalOptions,
};
use clap::Parser;
use tablebook::Database;

/// Initialize the tablebook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize tablebook data directory and database")]
pub struct InitCommand {
    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Running it again is safe: the schema is left as is and only floor-plan
    /// tables that are still missing are added.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = data_dir(global)?;
        let config = load_configuration(global)?;
        let db_config = database_config(global, &config)?;
        let db_path = db_config.path.clone();
        let plan_size = config.floor_plan.as_ref().map_or(0, Vec::len);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize tablebook in: {}", shorten_path(&data_dir));

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            if db_path.exists() {
                println!("  - Database already exists: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }

            println!("  - Sync {plan_size} floor-plan table(s) from configuration");
            return Ok(());
        }

        let data_dir_created = !data_dir.exists();
        let database_created = !db_path.exists();

        let mut db = Database::open(db_config)?;
        let added = sync_floor_plan(&mut db, &config)?;

        if !global.quiet {
            println!("Initialized tablebook in: {}", shorten_path(&data_dir));
            if data_dir_created {
                println!("  - Created data directory");
            }
            if database_created {
                println!("  - Created database");
            }
            if added.is_empty() {
                println!("  - Floor plan up to date ({plan_size} configured table(s))");
            } else {
                println!("  - Added {} table(s) from the floor plan", added.len());
            }
        }

        Ok(())
    }
}
