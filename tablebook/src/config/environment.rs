//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `TABLEBOOK_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, FloorPlanTable, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Boolean; disables creating the database on first use.
pub const DISABLE_AUTOINIT_ENV: &str = "TABLEBOOK_DISABLE_AUTOINIT";
/// One of `table`, `json`, `csv`, `tsv`.
pub const OUTPUT_FORMAT_ENV: &str = "TABLEBOOK_OUTPUT_FORMAT";
/// Default listing page size.
pub const DEFAULT_PER_PAGE_ENV: &str = "TABLEBOOK_DEFAULT_PER_PAGE";
/// Largest listing page size.
pub const MAX_PER_PAGE_ENV: &str = "TABLEBOOK_MAX_PER_PAGE";
/// Extra floor-plan tables, as `T01:2,T02:4`.
pub const TABLES_ENV: &str = "TABLEBOOK_TABLES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Scalars replace the configured value. `TABLEBOOK_TABLES` entries are
    /// appended to the floor plan, replacing a configured table with the
    /// same number.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric page size, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(LOCK_WAIT_ENV, &seconds)?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            let format: OutputFormat = val.parse().map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        if let Ok(val) = env::var(DEFAULT_PER_PAGE_ENV) {
            let pagination = config.pagination.get_or_insert_with(Default::default);
            pagination.default_per_page = Some(Self::parse_number(DEFAULT_PER_PAGE_ENV, &val)?);
        }

        if let Ok(val) = env::var(MAX_PER_PAGE_ENV) {
            let pagination = config.pagination.get_or_insert_with(Default::default);
            pagination.max_per_page = Some(Self::parse_number(MAX_PER_PAGE_ENV, &val)?);
        }

        if let Ok(val) = env::var(TABLES_ENV) {
            let tables = Self::parse_tables(&val)?;
            let plan = config.floor_plan.get_or_insert_with(Vec::new);
            for table in tables {
                plan.retain(|existing| existing.number != table.number);
                plan.push(table);
            }
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: std::str::FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: "Must be a positive integer".into(),
        })
    }

    /// Parse floor-plan tables from a comma-separated `NUMBER:CAPACITY` list.
    fn parse_tables(s: &str) -> Result<Vec<FloorPlanTable>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                FloorPlanTable::parse(part).map_err(|message| Error::Validation {
                    field: TABLES_ENV.into(),
                    message,
                })
            })
            .collect()
    }
}
