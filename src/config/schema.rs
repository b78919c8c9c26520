//! Configuration schema types
//!
//! This module defines the configuration structure for Docsheet.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Characters Excel refuses in worksheet names
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Maximum worksheet name length accepted by Excel
const MAX_SHEET_LABEL_LEN: usize = 31;

/// Main Docsheet configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsheetConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Firestore connection settings
    pub firestore: FirestoreConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocsheetConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.firestore.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Firestore connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud / Firebase project ID
    pub project_id: String,

    /// Database ID within the project
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// REST endpoint root, e.g. `http://localhost:8080/v1` for the emulator
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Firebase web API key, sent as the `key` query parameter when present
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Documents requested per page while reading a collection
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against a local emulator behind a self-signed proxy.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl FirestoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("firestore.project_id cannot be empty".to_string());
        }

        if self.database_id.trim().is_empty() {
            return Err("firestore.database_id cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("firestore.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!(
                "firestore.base_url '{}' is not a valid URL",
                self.base_url
            ));
        }

        if let Some(ref key) = self.api_key {
            use secrecy::ExposeSecret;
            if key.expose_secret().is_empty() {
                return Err("firestore.api_key cannot be blank when set".to_string());
            }
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "firestore.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        if !(1..=1000).contains(&self.page_size) {
            return Err(format!(
                "firestore.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database_id: default_database_id(),
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
            tls_verify: true,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported spreadsheets are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Name of the worksheet holding the exported rows
    #[serde(default = "default_sheet_label")]
    pub sheet_label: String,

    /// Delay after a successful export before the workflow returns to idle
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        validate_sheet_label(&self.sheet_label)
            .map_err(|e| format!("Invalid export.sheet_label: {e}"))?;

        if self.reset_delay_ms > 3_600_000 {
            return Err(format!(
                "export.reset_delay_ms must be <= 3600000, got {}",
                self.reset_delay_ms
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sheet_label: default_sheet_label(),
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Checks a worksheet name against the rules Excel enforces
pub fn validate_sheet_label(label: &str) -> Result<(), String> {
    if label.trim().is_empty() {
        return Err("sheet label cannot be empty".to_string());
    }
    if label.chars().count() > MAX_SHEET_LABEL_LEN {
        return Err(format!(
            "sheet label '{label}' exceeds {MAX_SHEET_LABEL_LEN} characters"
        ));
    }
    if let Some(c) = label.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(format!("sheet label '{label}' contains forbidden character '{c}'"));
    }
    if label.starts_with('\'') || label.ends_with('\'') {
        return Err(format!(
            "sheet label '{label}' cannot start or end with an apostrophe"
        ));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> u32 {
    300
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_sheet_label() -> String {
    "Data".to_string()
}

fn default_reset_delay_ms() -> u64 {
    8000
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
