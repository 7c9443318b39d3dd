//! Status command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::UpdateStatusRequest;

/// Change a reservation's status, and optionally move it or replace its notes.
///
/// The new status must differ from the current one; use `reassign` to move
/// or annotate a reservation without changing its status.
#[derive(Args)]
pub struct StatusCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Target status: awaiting, confirmed, cancelled or completed
    #[arg(value_name = "STATUS")]
    pub status: String,

    /// Move the reservation to this table
    #[arg(long, value_name = "ID")]
    pub table: Option<i64>,

    /// Replace the notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let request = UpdateStatusRequest {
            status: self.status,
            table_id: self.table,
            notes: self.notes,
        };
        let view = manager(&config).update_status(&mut db, self.id, &request)?;

        render(
            output_format(global, &config),
            &view,
            std::slice::from_ref(&view),
        )
    }
}
