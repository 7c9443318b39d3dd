//! Layered restaurant configuration: busy timeout, auto-init, output
//! format, pagination and the floor plan.
//!
//! Sources, strongest first:
//!
//! 1. [`ConfigBuilder::with_config`] overrides
//! 2. `TABLEBOOK_*` environment variables ([`EnvironmentConfig`])
//! 3. `tablebook.local.yaml`
//! 4. `tablebook.yaml`, found by walking up from the working directory
//! 5. `<data_dir>/config.yaml`
//!
//! Scalars from a stronger source replace weaker ones; pagination merges
//! field by field; floor-plan entries accumulate by table number. The
//! merged result is checked by [`ConfigValidator`].
//!
//! ```no_run
//! use tablebook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/bistro"))
//!     .build()
//!     .unwrap();
//!
//! for table in config.floor_plan.unwrap_or_default() {
//!     println!("{} seats {}", table.number, table.capacity);
//! }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLayer, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, FloorPlanTable, OutputFormat, PaginationConfig};
pub use validator::ConfigValidator;
