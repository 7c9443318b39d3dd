//! Cancel command implementation.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::CancelRequest;

/// Cancel a reservation and free its table.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Reason, appended to the notes
    #[arg(long)]
    pub reason: Option<String>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let request = CancelRequest {
            reason: self.reason,
        };
        let view = manager(&config).cancel(&mut db, self.id, &request)?;

        render(
            output_format(global, &config),
            &view,
            std::slice::from_ref(&view),
        )
    }
}
