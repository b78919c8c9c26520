//! Export command implementation
//!
//! Runs both stages in order: the existence check, then the export.

use super::{report_failure, LoadedConfig, EXIT_CONFIG, EXIT_OK};
use crate::core::workflow::ExportWorkflow;
use crate::domain::{DocsheetError, FileName};
use crate::presentation::{spinner, theme, Notice, Operation};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Firestore collection to export (slash-separated for subcollections)
    pub collection: String,

    /// Base name of the workbook; `.xlsx` is appended
    #[arg(short, long)]
    pub file_name: String,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Override the worksheet name
    #[arg(long)]
    pub sheet_label: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!(
            collection = %self.collection,
            file_name = %self.file_name,
            "Starting export command"
        );

        let mut config = match config.or_report() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        // Apply CLI overrides
        if let Some(ref dir) = self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(ref label) = self.sheet_label {
            tracing::info!(sheet_label = %label, "Overriding sheet label from CLI");
            config.export.sheet_label = label.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        // Reject a blank file name before anything is queried.
        if let Err(msg) = FileName::new(self.file_name.as_str()) {
            return Ok(report_failure(
                Operation::Export,
                &DocsheetError::Validation(msg),
            ));
        }

        let workflow = match ExportWorkflow::from_config(&config) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("❌ Failed to initialize: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        theme::register();
        let indicator = spinner::follow(workflow.subscribe());

        let outcome = match workflow.check_existence(&self.collection).await {
            Ok(count) => {
                tracing::debug!(documents = count, "Check passed, exporting");
                workflow
                    .export_collection(&self.collection, &self.file_name)
                    .await
                    .map_err(|e| (Operation::Export, e))
            }
            Err(e) => Err((Operation::Check, e)),
        };

        drop(workflow);
        let _ = indicator.await;

        match outcome {
            Ok(summary) => {
                println!("{}", Notice::success(summary.message.clone()));
                println!();
                println!("📊 Export Summary:");
                println!("  Collection: {}", summary.collection);
                println!("  File: {}", summary.path.display());
                println!("  Rows: {}", summary.record_count);
                println!("  Columns: {}", summary.column_count);
                println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
                Ok(EXIT_OK)
            }
            Err((operation, e)) => Ok(report_failure(operation, &e)),
        }
    }
}
