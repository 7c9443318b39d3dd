//! Output rendering for command results.
//!
//! JSON prints the library's serde payloads unchanged. CSV and TSV go
//! through the `csv` writer with a header row; the table format is
//! tab-separated with an upper-case header.

use crate::error::CliError;
use serde::Serialize;
use std::io::{self, Write};
use tablebook::config::OutputFormat;
use tablebook::{ReservationView, Table};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A value that renders as one row of delimited output.
pub trait Record {
    /// Column names, in `fields` order.
    const HEADERS: &'static [&'static str];

    /// The row's cells.
    fn fields(&self) -> Vec<String>;
}

impl Record for ReservationView {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "time",
        "pax",
        "table",
        "customer",
        "phone",
        "status",
        "checked_in_at",
        "checked_out_at",
        "notes",
    ];

    fn fields(&self) -> Vec<String> {
        let name = format!("{} {}", self.customer.first_name, self.customer.last_name);
        vec![
            self.id.to_string(),
            self.reservation_date.format("%Y-%m-%d").to_string(),
            self.reservation_time.format("%H:%M").to_string(),
            self.pax_number.to_string(),
            self.table.table_number.clone(),
            name.trim().to_string(),
            self.customer.phone.clone(),
            self.status.to_string(),
            timestamp(self.checked_in_at),
            timestamp(self.checked_out_at),
            self.notes.clone(),
        ]
    }
}

impl Record for Table {
    const HEADERS: &'static [&'static str] = &["id", "number", "capacity", "status"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.table_number.clone(),
            self.capacity.to_string(),
            self.status.to_string(),
        ]
    }
}

fn timestamp(value: Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Render `records` to stdout in `format`.
///
/// `json` is what the JSON format prints; it is usually the records
/// themselves, or the page wrapping them.
pub fn render<T: Record, J: Serialize + ?Sized>(
    format: OutputFormat,
    json: &J,
    records: &[T],
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_records(&mut handle, format, json, records)
}

/// Like [`render`], writing to `out`.
pub fn write_records<W: Write, T: Record, J: Serialize + ?Sized>(
    out: &mut W,
    format: OutputFormat,
    json: &J,
    records: &[T],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, json)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_delimited(out, b',', records)?,
        OutputFormat::Tsv => write_delimited(out, b'\t', records)?,
        OutputFormat::Table => write_table(out, records)?,
    }
    Ok(())
}

fn write_delimited<W: Write, T: Record>(
    out: &mut W,
    delimiter: u8,
    records: &[T],
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    writer.flush()?;
    Ok(())
}

fn write_table<W: Write, T: Record>(out: &mut W, records: &[T]) -> Result<(), CliError> {
    let header = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header}")?;

    for record in records {
        let cells: Vec<String> = record
            .fields()
            .into_iter()
            .map(|cell| {
                if cell.is_empty() {
                    "-".to_string()
                } else {
                    cell.replace(['\n', '\t'], " ")
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    Ok(())
}
