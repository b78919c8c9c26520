//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so the
//! initialisation checks live in a single test.

use docsheet::config::LoggingConfig;
use docsheet::domain::{CollectionName, DocsheetError, FileName};
use docsheet::logging::{init_logging, LOG_FILE_NAME};
use docsheet::{log_error_with_context, log_export_complete, log_export_start};
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_writes_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    // Events from this test crate fall outside the default `docsheet` target.
    std::env::set_var("RUST_LOG", "info");
    let guard = init_logging("info", &config).unwrap();
    std::env::remove_var("RUST_LOG");
    assert!(log_path.exists());

    let collection = CollectionName::new("users").unwrap();
    let file_name = FileName::new("users-export").unwrap();
    let pass_id = Uuid::new_v4();
    log_export_start!(pass_id, &collection, &file_name);
    log_export_complete!(pass_id, 3usize, Duration::from_millis(120));
    log_error_with_context!(
        &DocsheetError::EmptyCollection("users".to_string()),
        "Export aborted"
    );

    // Dropping the guard flushes the non-blocking writer.
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("Starting export"));
    assert!(contents.contains("users-export"));
    assert!(contents.contains("Export completed"));

    // A second subscriber cannot be installed
    let second = init_logging("info", &LoggingConfig::default());
    assert!(matches!(second, Err(DocsheetError::Configuration(_))));
}

#[test]
fn test_init_logging_rejects_unknown_level() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(matches!(result, Err(DocsheetError::Configuration(_))));
}
