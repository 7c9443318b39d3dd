//! Configuration validation.
//!
//! This module checks the merged configuration before anything uses it, so
//! a bad file is reported at startup instead of surfacing as a strange
//! booking error later.

use crate::config::schema::{Config, FloorPlanTable, PaginationConfig};
use crate::error::{Error, Result};
use crate::table::NewTable;
use std::collections::HashSet;

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(ref pagination) = config.pagination {
            Self::validate_pagination(pagination)?;
        }

        if let Some(ref plan) = config.floor_plan {
            Self::validate_floor_plan(plan)?;
        }

        Ok(())
    }

    /// Validate page sizes.
    ///
    /// Unset fields are compared against the built-in defaults.
    fn validate_pagination(pagination: &PaginationConfig) -> Result<()> {
        if pagination.default_per_page == Some(0) {
            return Err(Error::Validation {
                field: "pagination.default_per_page".into(),
                message: "Must be greater than 0".into(),
            });
        }

        let default = pagination
            .default_per_page
            .unwrap_or(crate::booking::DEFAULT_PER_PAGE);
        let max = pagination
            .max_per_page
            .unwrap_or(crate::booking::MAX_PER_PAGE);
        if max < default {
            return Err(Error::Validation {
                field: "pagination.max_per_page".into(),
                message: format!("max_per_page ({max}) must be >= default_per_page ({default})"),
            });
        }

        Ok(())
    }

    /// Validate the floor plan: each entry must be a valid table, and
    /// numbers must be unique.
    fn validate_floor_plan(plan: &[FloorPlanTable]) -> Result<()> {
        let mut seen = HashSet::new();

        for (index, entry) in plan.iter().enumerate() {
            let table = NewTable::new(entry.number.as_str(), entry.capacity).map_err(|e| {
                Error::Validation {
                    field: format!("floor_plan[{index}].{}", e.field),
                    message: e.message,
                }
            })?;

            if !seen.insert(table.table_number().to_string()) {
                return Err(Error::Validation {
                    field: format!("floor_plan[{index}].number"),
                    message: format!("Duplicate table number: {}", table.table_number()),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_plan(entries: &[(&str, u32)]) -> Config {
        Config {
            floor_plan: Some(
                entries
                    .iter()
                    .map(|(number, capacity)| FloorPlanTable {
                        number: (*number).into(),
                        capacity: *capacity,
                    })
                    .collect(),
            ),
            ..Config::default()
        }
    }

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            maximum_lock_wait_seconds: Some(5),
            pagination: Some(PaginationConfig {
                default_per_page: Some(10),
                max_per_page: Some(10),
            }),
            ..with_plan(&[("T01", 2), ("T02", 20)])
        };
        ConfigValidator::validate(&config).unwrap();
    }

    #[test]
    fn test_zero_lock_wait() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Config::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "maximum_lock_wait_seconds"
        );
    }

    #[test]
    fn test_zero_default_per_page() {
        let config = Config {
            pagination: Some(PaginationConfig {
                default_per_page: Some(0),
                max_per_page: None,
            }),
            ..Config::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "pagination.default_per_page"
        );
    }

    #[test]
    fn test_max_below_default() {
        let config = Config {
            pagination: Some(PaginationConfig {
                default_per_page: None,
                max_per_page: Some(5),
            }),
            ..Config::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "pagination.max_per_page"
        );
    }

    #[test]
    fn test_floor_plan_bad_entries() {
        assert_eq!(
            field_of(ConfigValidator::validate(&with_plan(&[(" ", 2)]))),
            "floor_plan[0].table_number"
        );
        assert_eq!(
            field_of(ConfigValidator::validate(&with_plan(&[("T01", 2), ("T02", 21)]))),
            "floor_plan[1].capacity"
        );
        let long = "T".repeat(33);
        assert!(ConfigValidator::validate(&with_plan(&[(long.as_str(), 2)])).is_err());
    }

    #[test]
    fn test_floor_plan_duplicate_number() {
        let config = with_plan(&[("T01", 2), ("T01 ", 4)]);
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "floor_plan[1].number"
        );
    }
}
