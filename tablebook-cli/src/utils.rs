//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management and the booking
//! manager wiring.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tablebook::config::OutputFormat;
use tablebook::database::resolve_data_dir;
use tablebook::{
    Config, ConfigBuilder, Database, DatabaseConfig, ReservationManager, SqliteStore, Table,
    TableCatalog,
};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Override the output format.
    pub format: Option<OutputFormat>,
}

/// Resolve the data directory: `--data-dir` first, then the library default.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project configuration files
/// 3. User configuration in the data directory
/// 4. Built-in defaults (lowest priority)
///
/// Global command-line options are applied on top by the callers.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let config = ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(config)
}

/// The output format: `--format`, then the configuration, then `table`.
pub fn output_format(global: &GlobalOptions, config: &Config) -> OutputFormat {
    global
        .format
        .or(config.output_format)
        .unwrap_or(OutputFormat::Table)
}

/// Open the database for `global`, creating it unless auto-init is disabled.
///
/// A database created here is seeded with the configured floor plan.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_config = database_config(global, config)?;
    let exists = db_config.exists();

    if !exists && (global.disable_autoinit || config.disable_autoinit == Some(true)) {
        return Err(CliError::NoDataDirectory);
    }

    let mut db = Database::open(db_config)?;
    if !exists {
        sync_floor_plan(&mut db, config)?;
    }
    Ok(db)
}

/// Database settings: `<data_dir>/tablebook.db`, with `--busy-timeout` or
/// `maximum_lock_wait_seconds` as the busy timeout.
pub fn database_config(global: &GlobalOptions, config: &Config) -> Result<DatabaseConfig, CliError> {
    let mut db_config = DatabaseConfig::in_data_dir(data_dir(global)?);

    if let Some(timeout_seconds) = global.busy_timeout.or(config.maximum_lock_wait_seconds) {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    }

    Ok(db_config)
}

/// Add every configured floor-plan table that is not yet in the catalog.
pub fn sync_floor_plan(db: &mut Database, config: &Config) -> Result<Vec<Table>, CliError> {
    match config.floor_plan {
        Some(ref plan) if !plan.is_empty() => TableCatalog::new(&SqliteStore)
            .sync_floor_plan(db, plan)
            .map_err(CliError::from),
        _ => Ok(Vec::new()),
    }
}

/// The production booking manager for `config`.
pub fn manager(config: &Config) -> ReservationManager {
    ReservationManager::from_config(config)
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
