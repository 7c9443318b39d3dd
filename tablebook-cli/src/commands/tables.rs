//! Tables command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::{SqliteStore, TableCatalog};

/// List every table, ordered by number.
#[derive(Args)]
pub struct TablesCommand {}

impl TablesCommand {
    /// Execute the tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let tables = TableCatalog::new(&SqliteStore).list(db.connection())?;
        render(output_format(global, &config), &tables, &tables)
    }
}
