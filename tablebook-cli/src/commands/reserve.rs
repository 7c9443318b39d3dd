//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a table
//! either from a JSON payload (the `CreateReservationRequest` shape) or
//! from individual flags.

use crate::error::CliError;
use crate::output::render;
use crate::utils::{load_configuration, manager, open_database, output_format, GlobalOptions};
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tablebook::{ContactDetails, CreateReservationRequest, ReservationDetails};

/// Book a table.
#[derive(Args)]
pub struct ReserveCommand {
    /// Read the request as JSON from FILE ("-" for stdin)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "title", "first_name", "last_name", "phone", "email",
            "pax", "date", "time", "table", "notes",
        ]
    )]
    pub json: Option<PathBuf>,

    /// Customer title (Mr, Mrs, Ms, Dr, Prof)
    #[arg(long)]
    pub title: Option<String>,

    /// Customer first name
    #[arg(long, value_name = "NAME")]
    pub first_name: Option<String>,

    /// Customer last name
    #[arg(long, value_name = "NAME")]
    pub last_name: Option<String>,

    /// Customer phone number; identifies returning customers
    #[arg(long)]
    pub phone: Option<String>,

    /// Customer email
    #[arg(long)]
    pub email: Option<String>,

    /// Party size
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub pax: Option<i64>,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Time (HH:MM, 24-hour)
    #[arg(long, value_name = "TIME")]
    pub time: Option<String>,

    /// Table id; omit to pick the smallest free table that fits
    #[arg(long, value_name = "ID")]
    pub table: Option<i64>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = self.request()?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let view = manager(&config).create(&mut db, &request)?;
        render(
            output_format(global, &config),
            &view,
            std::slice::from_ref(&view),
        )
    }

    /// Build the request from `--json` or from the individual flags.
    ///
    /// Flags are passed through as given; the library reports missing or
    /// malformed fields.
    fn request(self) -> Result<CreateReservationRequest, CliError> {
        if let Some(path) = self.json {
            let payload = read_payload(&path)?;
            return Ok(serde_json::from_str(&payload)?);
        }

        Ok(CreateReservationRequest {
            customer: ContactDetails {
                title: self.title.unwrap_or_default(),
                first_name: self.first_name.unwrap_or_default(),
                last_name: self.last_name.unwrap_or_default(),
                phone: self.phone.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
            },
            reservation: ReservationDetails {
                pax_number: self.pax.unwrap_or_default(),
                reservation_date: self.date.unwrap_or_default(),
                reservation_time: self.time.unwrap_or_default(),
                table_id: self.table,
                notes: self.notes.unwrap_or_default(),
            },
        })
    }
}

fn read_payload(path: &PathBuf) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut payload = String::new();
        io::stdin().read_to_string(&mut payload)?;
        Ok(payload)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
