//! Configuration management for Docsheet.
//!
//! Docsheet reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOCSHEET_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docsheet::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docsheet.toml")?;
//!
//! println!("Firestore project: {}", config.firestore.project_id);
//! println!("Output directory: {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`FirestoreConfig`] - Firestore project, endpoint and paging
//! - [`ExportConfig`] - Output directory, sheet label, reset delay
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [firestore]
//! project_id = "my-firebase-project"
//! api_key = "${DOCSHEET_FIRESTORE_API_KEY}"
//!
//! [export]
//! output_dir = "exports"
//! sheet_label = "Data"
//! reset_delay_ms = 8000
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, DocsheetConfig, ExportConfig, FirestoreConfig, LoggingConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
