//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Collection has no documents |
//! | 2 | Configuration or input error |
//! | 4 | Document store connection or query error |
//! | 5 | Fatal error, including workbook write failures |

pub mod check;
pub mod export;
pub mod init;
pub mod interactive;
pub mod validate;

use crate::config::{load_config, DocsheetConfig};
use crate::domain::DocsheetError;
use crate::log_error_with_context;
use crate::presentation::{Notice, Operation};

pub const EXIT_OK: i32 = 0;
pub const EXIT_EMPTY_COLLECTION: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_STORE: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Exit code for a workflow error
pub fn exit_code_for(err: &DocsheetError) -> i32 {
    match err {
        DocsheetError::EmptyCollection(_) => EXIT_EMPTY_COLLECTION,
        DocsheetError::Validation(_) | DocsheetError::Configuration(_) => EXIT_CONFIG,
        DocsheetError::StoreQuery(_) => EXIT_STORE,
        _ => EXIT_FATAL,
    }
}

/// Configuration file read once at startup
///
/// `main` reads logging settings from it before any command runs; the
/// command then takes ownership and reports a load failure itself.
#[derive(Debug)]
pub struct LoadedConfig {
    path: String,
    result: crate::domain::Result<DocsheetConfig>,
}

impl LoadedConfig {
    /// Load and validate the file at `path`
    pub fn load(path: &str) -> Self {
        Self {
            path: path.to_string(),
            result: load_config(path),
        }
    }

    /// Path the configuration was read from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The configuration, if it loaded
    pub fn config(&self) -> Option<&DocsheetConfig> {
        self.result.as_ref().ok()
    }

    /// Take the configuration, printing the failure for the user
    ///
    /// Returns the exit code to use when loading failed.
    pub(crate) fn or_report(self) -> Result<DocsheetConfig, i32> {
        let path = self.path;
        self.result.map_err(|e| {
            tracing::error!(config_path = %path, error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration from {path}");
            eprintln!("   Error: {e}");
            EXIT_CONFIG
        })
    }
}

/// Print the notice for a failed operation and return its exit code
///
/// Failures the user cannot fix by editing their input are logged and shown
/// with the underlying error.
pub(crate) fn report_failure(operation: Operation, err: &DocsheetError) -> i32 {
    eprintln!("{}", Notice::from_error(operation, err));
    if !err.is_user_recoverable() {
        let context = match operation {
            Operation::Check => "Collection check failed",
            Operation::Export => "Export failed",
        };
        log_error_with_context!(err, context);
        eprintln!("   Details: {err}");
    }
    exit_code_for(err)
}
