//! Logging and observability
//!
//! Console logs go to stderr; an optional JSON file layer rotates daily,
//! hourly or never. The macros below give export events a consistent set of
//! fields so passes can be followed by `pass_id`.
//!
//! # Example
//!
//! ```no_run
//! use docsheet::logging::init_logging;
//! use docsheet::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(collection = "users", "Checking collection");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log the start of an export pass
///
/// # Example
///
/// ```no_run
/// use docsheet::log_export_start;
/// use docsheet::domain::{CollectionName, FileName};
/// use uuid::Uuid;
///
/// let collection = CollectionName::new("users").unwrap();
/// let file_name = FileName::new("users").unwrap();
/// log_export_start!(Uuid::new_v4(), &collection, &file_name);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($pass_id:expr, $collection:expr, $file_name:expr) => {
        tracing::info!(
            pass_id = %$pass_id,
            collection = %$collection,
            file_name = %$file_name,
            "Starting export"
        );
    };
}

/// Log a finished export pass with its row count and duration
///
/// # Example
///
/// ```no_run
/// use docsheet::log_export_complete;
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// log_export_complete!(Uuid::new_v4(), 42, Duration::from_millis(350));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($pass_id:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            pass_id = %$pass_id,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error together with what was being attempted
///
/// # Example
///
/// ```no_run
/// use docsheet::log_error_with_context;
/// use docsheet::domain::DocsheetError;
///
/// let error = DocsheetError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
