//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for tablebook:
//! lock waiting, pagination defaults, output format and the floor plan.

use serde::{Deserialize, Deserializer, Serialize};

/// Complete configuration structure.
///
/// Every field is optional so that partial files from several sources can
/// be layered on top of each other.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, PaginationConfig};
///
/// let config = Config {
///     maximum_lock_wait_seconds: Some(10),
///     pagination: Some(PaginationConfig {
///         default_per_page: Some(20),
///         max_per_page: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.maximum_lock_wait_seconds, Some(10));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for the database write lock (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_autoinit: Option<bool>,

    /// Output format for listing commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Reservation listing page sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationConfig>,

    /// Tables the restaurant has, seeded into the catalog on `init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<Vec<FloorPlanTable>>,
}

/// Page size settings for reservation listings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size when a listing does not ask for one (default 10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_per_page: Option<u32>,

    /// Cap on the requested page size (default 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_page: Option<u32>,
}

/// One table of the configured floor plan.
///
/// Accepts either a mapping or the compact `"T01:4"` string form.
///
/// # Examples
///
/// ```
/// use tablebook::config::FloorPlanTable;
///
/// let compact: FloorPlanTable = serde_yaml::from_str("\"T01:4\"").unwrap();
/// let mapping: FloorPlanTable = serde_yaml::from_str("number: T01\ncapacity: 4").unwrap();
/// assert_eq!(compact, mapping);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FloorPlanTable {
    /// Table number, e.g. `T01`.
    pub number: String,
    /// Seats at the table.
    pub capacity: u32,
}

impl FloorPlanTable {
    /// Parses the compact `NUMBER:CAPACITY` form.
    ///
    /// # Errors
    ///
    /// Returns a message if the separator is missing or the capacity is not
    /// a number.
    pub fn parse(s: &str) -> Result<Self, String> {
        let (number, capacity) = s
            .split_once(':')
            .ok_or_else(|| format!("expected NUMBER:CAPACITY, got '{s}'"))?;
        let capacity = capacity
            .trim()
            .parse()
            .map_err(|_| format!("invalid capacity in '{s}'"))?;
        Ok(Self {
            number: number.trim().to_string(),
            capacity,
        })
    }
}

impl<'de> Deserialize<'de> for FloorPlanTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Mapping { number: String, capacity: u32 },
            Compact(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Mapping { number, capacity } => Ok(Self { number, capacity }),
            Helper::Compact(s) => Self::parse(&s).map_err(D::Error::custom),
        }
    }
}

/// Output format for listing commands.
///
/// # Examples
///
/// ```
/// use tablebook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
