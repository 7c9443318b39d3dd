//! Add-table command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::{NewTable, SqliteStore, TableCatalog};

/// Add a table to the catalog.
#[derive(Args)]
pub struct AddTableCommand {
    /// Table number, unique across tables (e.g. T04)
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Number of seats (1-20)
    #[arg(value_name = "CAPACITY")]
    pub capacity: u32,
}

impl AddTableCommand {
    /// Execute the add-table command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let table = NewTable::new(self.number, self.capacity).map_err(tablebook::Error::from)?;
        let table = TableCatalog::new(&SqliteStore).add(db.connection(), &table)?;

        render(
            output_format(global, &config),
            &table,
            std::slice::from_ref(&table),
        )
    }
}
