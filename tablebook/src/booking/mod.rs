//! Booking components.
//!
//! Leaf first:
//!
//! - [`CustomerResolver`]: find-or-create a customer by phone
//! - [`ConflictChecker`]: the two-hour turnover window per table
//! - [`TableAllocator`]: explicit or automatic table choice
//! - [`TableCatalog`]: adding tables and syncing the configured floor plan
//! - [`ReservationManager`]: the lifecycle operations, each in one unit of work

pub mod allocator;
pub mod availability;
pub mod catalog;
pub mod lifecycle;
pub mod resolver;

pub use allocator::{AllocationOutcome, AllocationRequest, TableAllocator};
pub use availability::ConflictChecker;
pub use catalog::TableCatalog;
pub use lifecycle::ReservationManager;
pub use resolver::CustomerResolver;

use crate::config::Config;

/// Page size used when a listing does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a listing may ask for.
pub const MAX_PER_PAGE: u32 = 100;

/// Tunables for the lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSettings {
    /// Page size when none (or a non-positive one) is requested.
    pub default_per_page: u32,
    /// Cap on the requested page size.
    pub max_per_page: u32,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

impl BookingSettings {
    /// Reads the pagination section of a configuration, falling back to defaults.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let Some(pagination) = &config.pagination else {
            return defaults;
        };
        Self {
            default_per_page: pagination
                .default_per_page
                .unwrap_or(defaults.default_per_page),
            max_per_page: pagination.max_per_page.unwrap_or(defaults.max_per_page),
        }
    }
}
