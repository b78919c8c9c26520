//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Docsheet configuration file.

use super::{LoadedConfig, EXIT_OK};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// [`load_config`](crate::config::load_config) validates as it loads, so
    /// a loaded configuration is a valid one.
    pub async fn execute(&self, config: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config.path(), "Validating configuration");

        println!("🔍 Validating configuration file: {}", config.path());
        println!();

        let config = match config.or_report() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Firestore Project: {}", config.firestore.project_id);
        println!("  Firestore Database: {}", config.firestore.database_id);
        println!("  Firestore Endpoint: {}", config.firestore.base_url);
        println!(
            "  API Key: {}",
            if config.firestore.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Page Size: {}", config.firestore.page_size);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Sheet Label: {}", config.export.sheet_label);
        println!("  Reset Delay: {} ms", config.export.reset_delay_ms);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        Ok(EXIT_OK)
    }
}
