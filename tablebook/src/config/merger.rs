//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources,
//! with special handling for the accumulated floor plan.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, FloorPlanTable, PaginationConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use tablebook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Pagination: field-by-field merge
    /// - Floor plan: accumulated; a source entry replaces a target entry
    ///   with the same table number
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(source_pagination) = source.pagination {
            target.pagination = Some(match target.pagination {
                Some(target_pagination) => {
                    Self::merge_pagination(target_pagination, source_pagination)
                }
                None => source_pagination,
            });
        }

        if let Some(ref source_plan) = source.floor_plan {
            match &mut target.floor_plan {
                Some(target_plan) => Self::merge_floor_plan(target_plan, source_plan),
                None => target.floor_plan.clone_from(&source.floor_plan),
            }
        }
    }

    fn merge_pagination(target: PaginationConfig, source: PaginationConfig) -> PaginationConfig {
        PaginationConfig {
            default_per_page: source.default_per_page.or(target.default_per_page),
            max_per_page: source.max_per_page.or(target.max_per_page),
        }
    }

    fn merge_floor_plan(target: &mut Vec<FloorPlanTable>, source: &[FloorPlanTable]) {
        for table in source {
            match target.iter_mut().find(|t| t.number == table.number) {
                Some(existing) => existing.capacity = table.capacity,
                None => target.push(table.clone()),
            }
        }
    }
}
