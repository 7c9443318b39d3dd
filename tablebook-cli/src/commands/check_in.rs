//! Check-in command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;

/// Seat a confirmed party; the table becomes occupied.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let view = manager(&config).check_in(&mut db, self.id)?;
        render(
            output_format(global, &config),
            &view,
            std::slice::from_ref(&view),
        )
    }
}
