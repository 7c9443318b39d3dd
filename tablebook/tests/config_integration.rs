//! Integration tests for the configuration system.
//!
//! These cover file discovery, layering of user and project files,
//! environment overrides and validation, and feeding the resulting floor
//! plan and pagination settings into the booking layer.
//!
//! Tests that touch `TABLEBOOK_*` variables are `#[serial]`: the process
//! environment is shared between test threads.

mod common;

use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tablebook::booking::BookingSettings;
use tablebook::config::{Config, ConfigBuilder, FloorPlanTable, OutputFormat};
use tablebook::error::Error;
use tablebook::{ReservationManager, SqliteStore, TableCatalog};

const ENV_VARS: [&str; 6] = [
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_DISABLE_AUTOINIT",
    "TABLEBOOK_OUTPUT_FORMAT",
    "TABLEBOOK_DEFAULT_PER_PAGE",
    "TABLEBOOK_MAX_PER_PAGE",
    "TABLEBOOK_TABLES",
];

fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}

fn clean_env() -> Vec<EnvGuard> {
    ENV_VARS.iter().map(|key| EnvGuard::remove(key)).collect()
}

/// A builder isolated to `project` with an empty user data directory.
fn builder_for(project: &Path, data_dir: &Path) -> ConfigBuilder {
    ConfigBuilder::new()
        .with_working_dir(project)
        .with_data_dir(data_dir)
}

fn plan_numbers(config: &Config) -> Vec<(String, u32)> {
    config
        .floor_plan
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|t| (t.number.clone(), t.capacity))
        .collect()
}

// ============================================================================
// File discovery and layering
// ============================================================================

#[test]
#[serial]
fn test_no_files_yields_defaults() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    let config = builder_for(project.path(), data.path()).build().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_project_file_found_from_subdirectory() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "floor_plan:\n  - number: T01\n    capacity: 2\n  - T02:4\n",
    );
    let nested = project.path().join("site").join("front");
    fs::create_dir_all(&nested).unwrap();

    let config = builder_for(&nested, data.path()).build().unwrap();
    assert_eq!(
        plan_numbers(&config),
        vec![("T01".to_string(), 2), ("T02".to_string(), 4)]
    );
}

#[test]
#[serial]
fn test_local_file_layers_over_project_file() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        data.path(),
        "config.yaml",
        "maximum_lock_wait_seconds: 9\noutput_format: csv\n",
    );
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "output_format: table\npagination:\n  default_per_page: 20\nfloor_plan:\n  - T01:2\n  - T02:4\n",
    );
    create_temp_config(
        project.path(),
        "tablebook.local.yaml",
        "pagination:\n  max_per_page: 40\nfloor_plan:\n  - T02:6\n  - T09:8\n",
    );

    let config = builder_for(project.path(), data.path()).build().unwrap();

    assert_eq!(config.maximum_lock_wait_seconds, Some(9));
    assert_eq!(config.output_format, Some(OutputFormat::Table));
    let pagination = config.pagination.unwrap();
    assert_eq!(pagination.default_per_page, Some(20));
    assert_eq!(pagination.max_per_page, Some(40));
    assert_eq!(
        plan_numbers(&config),
        vec![
            ("T01".to_string(), 2),
            ("T02".to_string(), 6),
            ("T09".to_string(), 8),
        ]
    );
}

#[test]
#[serial]
fn test_unknown_field_is_rejected() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(project.path(), "tablebook.yaml", "open_hours: 9-17\n");

    let err = builder_for(project.path(), data.path()).build().unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
#[serial]
fn test_invalid_floor_plan_in_file() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "floor_plan:\n  - T01:2\n  - T01:4\n",
    );

    match builder_for(project.path(), data.path()).build() {
        Err(Error::Validation { field, .. }) => assert_eq!(field, "floor_plan[1].number"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_files() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "maximum_lock_wait_seconds: 5\noutput_format: json\nfloor_plan:\n  - T01:2\n",
    );
    let _lock = EnvGuard::new("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "12");
    let _format = EnvGuard::new("TABLEBOOK_OUTPUT_FORMAT", "tsv");
    let _tables = EnvGuard::new("TABLEBOOK_TABLES", "T01:3, T05:6");

    let config = builder_for(project.path(), data.path()).build().unwrap();

    assert_eq!(config.maximum_lock_wait_seconds, Some(12));
    assert_eq!(config.output_format, Some(OutputFormat::Tsv));
    assert_eq!(
        plan_numbers(&config),
        vec![("T01".to_string(), 3), ("T05".to_string(), 6)]
    );
}

#[test]
#[serial]
fn test_skip_env_ignores_variables() {
    let _env = clean_env();
    let _lock = EnvGuard::new("TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS", "12");

    let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
    assert_eq!(config.maximum_lock_wait_seconds, None);
}

#[test]
#[serial]
fn test_malformed_env_value() {
    let _env = clean_env();
    let _pages = EnvGuard::new("TABLEBOOK_DEFAULT_PER_PAGE", "lots");

    match ConfigBuilder::new().skip_files().build() {
        Err(Error::Validation { field, .. }) => assert_eq!(field, "TABLEBOOK_DEFAULT_PER_PAGE"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_env_pagination_validated_against_file() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "pagination:\n  default_per_page: 30\n",
    );
    let _max = EnvGuard::new("TABLEBOOK_MAX_PER_PAGE", "25");

    let err = builder_for(project.path(), data.path()).build().unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
#[serial]
fn test_programmatic_override_beats_env() {
    let _env = clean_env();
    let _format = EnvGuard::new("TABLEBOOK_OUTPUT_FORMAT", "csv");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            output_format: Some(OutputFormat::Json),
            ..Config::default()
        })
        .build()
        .unwrap();
    assert_eq!(config.output_format, Some(OutputFormat::Json));
}

// ============================================================================
// Configuration into the booking layer
// ============================================================================

#[test]
#[serial]
fn test_configured_floor_plan_and_pagination_drive_bookings() {
    let _env = clean_env();
    let project = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    create_temp_config(
        project.path(),
        "tablebook.yaml",
        "pagination:\n  default_per_page: 2\n  max_per_page: 3\nfloor_plan:\n  - T01:2\n  - T02:4\n  - T03:4\n",
    );
    let config = builder_for(project.path(), data.path()).build().unwrap();

    let (_dir, mut db) = common::create_test_database();
    let plan: Vec<FloorPlanTable> = config.floor_plan.clone().unwrap();
    let added = TableCatalog::new(&SqliteStore)
        .sync_floor_plan(&mut db, &plan)
        .unwrap();
    assert_eq!(added.len(), 3);

    // A second sync is a no-op.
    let again = TableCatalog::new(&SqliteStore)
        .sync_floor_plan(&mut db, &plan)
        .unwrap();
    assert!(again.is_empty());

    let settings = BookingSettings::from_config(&config);
    assert_eq!(settings.default_per_page, 2);
    assert_eq!(settings.max_per_page, 3);

    let manager = ReservationManager::new(
        SqliteStore,
        tablebook::FixedClock::new(common::now()),
        settings,
    );
    for (i, time) in ["12:00", "14:00", "16:00", "18:00"].iter().enumerate() {
        manager
            .create(
                &mut db,
                &common::BookingFixture::new()
                    .phone(&format!("555-04{i:02}"))
                    .at(common::TOMORROW, time)
                    .build(),
            )
            .unwrap();
    }

    let page = manager
        .list(&db, &tablebook::ReservationQuery::default())
        .unwrap();
    assert_eq!(page.per_page, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 2);

    let page = manager
        .list(
            &db,
            &tablebook::ReservationQuery {
                per_page: Some(50),
                ..tablebook::ReservationQuery::default()
            },
        )
        .unwrap();
    assert_eq!(page.per_page, 3);
    assert_eq!(page.items.len(), 3);
}
