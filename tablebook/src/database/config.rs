//! Where the booking database lives and how long writers wait for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the booking database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "tablebook.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TABLEBOOK_DATA_DIR";

/// Busy timeout used when nothing else is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection parameters for [`super::Database::open`].
///
/// # Examples
///
/// ```
/// use tablebook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::in_data_dir("/srv/bistro")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert!(config.path.ends_with("tablebook.db"));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a writer waits for the lock before [`Error::LockTimeout`].
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for the database file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Settings for `<data_dir>/tablebook.db`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }

    /// Sets the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Whether the database file is already on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Returns the default data directory, `~/.tablebook`.
///
/// # Errors
///
/// Returns [`Error::DataDirectoryNotFound`] if the home directory cannot be
/// determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".tablebook"))
        .ok_or_else(|| Error::DataDirectoryNotFound {
            path: PathBuf::from("~/.tablebook"),
        })
}

/// `TABLEBOOK_DATA_DIR` if set and non-empty, else [`default_data_dir`].
///
/// # Errors
///
/// Returns an error if the variable is unset and the home directory cannot
/// be determined.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}
