//! Reassign command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::ReassignRequest;

/// Move an active reservation to another table or replace its notes,
/// keeping its status. At least one of `--table` and `--notes` is needed.
#[derive(Args)]
pub struct ReassignCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Move the reservation to this table
    #[arg(long, value_name = "ID")]
    pub table: Option<i64>,

    /// Replace the notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl ReassignCommand {
    /// Execute the reassign command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let request = ReassignRequest {
            table_id: self.table,
            notes: self.notes,
        };
        let view = manager(&config).reassign(&mut db, self.id, &request)?;

        render(
            output_format(global, &config),
            &view,
            std::slice::from_ref(&view),
        )
    }
}
