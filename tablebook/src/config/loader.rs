//! Finding and parsing configuration files.
//!
//! Three file layers exist, weakest first: the user file in the data
//! directory, the project `tablebook.yaml` and its uncommitted
//! `tablebook.local.yaml` neighbour. Project files are found by walking up
//! from the working directory to the first directory holding either one.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user configuration inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE: &str = "tablebook.yaml";

/// File name of the private, uncommitted project configuration.
pub const LOCAL_CONFIG_FILE: &str = "tablebook.local.yaml";

/// Which file a [`ConfigSource`] came from. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigLayer {
    /// `<data_dir>/config.yaml`.
    User,
    /// `tablebook.yaml`.
    Project,
    /// `tablebook.local.yaml`.
    Local,
}

impl ConfigLayer {
    /// The file name this layer is read from.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::User => USER_CONFIG_FILE,
            Self::Project => PROJECT_CONFIG_FILE,
            Self::Local => LOCAL_CONFIG_FILE,
        }
    }
}

/// One parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where it was read from.
    pub path: PathBuf,
    /// Its layer.
    pub layer: ConfigLayer,
    /// Its contents.
    pub config: Config,
}

/// Reads configuration files from disk.
///
/// # Examples
///
/// ```no_run
/// use tablebook::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), Some(Path::new("/srv/bistro"))).unwrap();
/// for source in &sources {
///     println!("{:?}: {}", source.layer, source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies, weakest layer first.
    ///
    /// Without `data_dir` the user file is looked for in the resolved data
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::database::resolve_data_dir()?,
        };

        let mut sources: Vec<ConfigSource> = Self::load_layer(&data_dir, ConfigLayer::User)?
            .into_iter()
            .collect();
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|source| source.layer);

        Ok(sources)
    }

    /// The project and local files of the nearest directory, at or above
    /// `start_dir`, that has either.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        for dir in start_dir.ancestors() {
            let mut found = Vec::new();
            for layer in [ConfigLayer::Project, ConfigLayer::Local] {
                found.extend(Self::load_layer(dir, layer)?);
            }
            if !found.is_empty() {
                return Ok(found);
            }
        }
        Ok(Vec::new())
    }

    fn load_layer(dir: &Path, layer: ConfigLayer) -> Result<Option<ConfigSource>> {
        let path = dir.join(layer.file_name());
        if !path.is_file() {
            return Ok(None);
        }
        let config = Self::load_file(&path)?;
        Ok(Some(ConfigSource {
            path,
            layer,
            config,
        }))
    }

    /// Parses one YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read, or
    /// [`Error::Validation`] naming the file if it is not a valid
    /// configuration (including unknown keys).
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid configuration: {e}"),
        })
    }
}
