//! Available command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::AvailableTablesQuery;

/// List the tables that could seat a party at a given slot, smallest first.
#[derive(Args)]
pub struct AvailableCommand {
    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Time (HH:MM, 24-hour)
    #[arg(long, value_name = "TIME")]
    pub time: String,

    /// Party size
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub pax: i64,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let query = AvailableTablesQuery {
            date: self.date,
            time: self.time,
            pax: self.pax,
        };
        let tables = manager(&config).available_tables(&db, &query)?;

        render(output_format(global, &config), &tables, &tables)
    }
}
