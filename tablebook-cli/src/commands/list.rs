//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations,
//! newest slot first, one page at a time.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use tablebook::config::OutputFormat;
use tablebook::ReservationQuery;

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations on this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Only reservations with this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    /// Only reservations for this customer id
    #[arg(long, value_name = "ID")]
    pub customer: Option<i64>,

    /// Only reservations at this table id
    #[arg(long, value_name = "ID")]
    pub table: Option<i64>,

    /// Page number, starting at 1
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Rows per page
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub per_page: Option<i64>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let query = ReservationQuery {
            date: self.date,
            status: self.status,
            customer_id: self.customer,
            table_id: self.table,
            page: self.page,
            per_page: self.per_page,
        };
        let page = manager(&config).list(&db, &query)?;

        let format = output_format(global, &config);
        render(format, &page, &page.items)?;

        if matches!(format, OutputFormat::Table) && !global.quiet {
            eprintln!(
                "page {} of {} ({} reservation(s))",
                page.page, page.total_pages, page.total
            );
        }

        Ok(())
    }
}
