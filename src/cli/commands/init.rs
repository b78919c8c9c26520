//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "docsheet.toml")]
    pub output: String,

    /// Configure for the local Firestore emulator instead of production
    #[arg(long)]
    pub emulator: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Docsheet configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, self.render()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project ID", self.output);
                if !self.emulator {
                    println!("  2. Set DOCSHEET_FIRESTORE_API_KEY in your environment or .env file");
                } else {
                    println!("  2. Start the emulator: firebase emulators:start --only firestore");
                }
                println!("  3. Validate configuration: docsheet validate-config");
                println!("  4. Run: docsheet interactive");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    fn render(&self) -> String {
        let firestore = if self.emulator {
            r#"[firestore]
project_id = "demo-project"
base_url = "http://localhost:8080/v1"
timeout_seconds = 10
page_size = 300
"#
        } else {
            r#"[firestore]
project_id = "your-firebase-project"
database_id = "(default)"
base_url = "https://firestore.googleapis.com/v1"

# Web API key; leave out when rules allow unauthenticated reads
api_key = "${DOCSHEET_FIRESTORE_API_KEY}"

timeout_seconds = 30
page_size = 300
tls_verify = true
"#
        };

        format!(
            r#"# Docsheet Configuration File
# Firestore collection to Excel exporter

[application]
log_level = "info"

{firestore}
[export]
# Workbooks are written here as <file name>.xlsx
output_dir = "."
sheet_label = "Data"

# Milliseconds after a successful export before the form clears
reset_delay_ms = 8000

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        )
    }
}
