//! Check command implementation
//!
//! Runs the existence check on its own: does the collection hold documents?

use super::{report_failure, LoadedConfig, EXIT_CONFIG, EXIT_OK};
use crate::core::workflow::ExportWorkflow;
use crate::presentation::{spinner, theme, Operation};
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Firestore collection to check (slash-separated for subcollections)
    pub collection: String,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!(collection = %self.collection, "Starting check command");

        let config = match config.or_report() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let workflow = match ExportWorkflow::from_config(&config) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("❌ Failed to initialize: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        theme::register();
        let indicator = spinner::follow(workflow.subscribe());
        let result = workflow.check_existence(&self.collection).await;
        drop(workflow);
        let _ = indicator.await;

        match result {
            Ok(count) => {
                println!(
                    "✅ Collection \"{}\" has {count} document(s)",
                    self.collection.trim()
                );
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure(Operation::Check, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_check_missing_config() {
        let args = CheckArgs {
            collection: "users".to_string(),
        };
        let code = args
            .execute(LoadedConfig::load("/nonexistent/docsheet.toml"))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_check_blank_collection_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[firestore]\nproject_id = \"demo\"\nbase_url = \"http://127.0.0.1:9/v1\"").unwrap();

        let args = CheckArgs {
            collection: "   ".to_string(),
        };
        let code = args
            .execute(LoadedConfig::load(file.path().to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
