//! Interactive command implementation
//!
//! A line-oriented terminal form over the export workflow. The user first
//! enters a collection name, then a file name once the collection is
//! confirmed. After a successful export the form clears itself when the
//! workflow resets.

use super::{LoadedConfig, EXIT_CONFIG, EXIT_OK};
use crate::core::workflow::{ExportWorkflow, WorkflowSnapshot};
use crate::presentation::{spinner, theme, FormView, Notice, Operation};
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const RESET_COMMAND: &str = ":reset";
const QUIT_COMMANDS: [&str; 2] = [":quit", ":q"];

/// Arguments for the interactive command
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

/// Values typed into the form
#[derive(Debug, Default, PartialEq)]
struct FormInputs {
    collection: String,
    file: String,
}

/// What a line of input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAction {
    Quit,
    Reset,
    Check,
    Export,
}

impl InteractiveArgs {
    /// Execute the interactive command
    pub async fn execute(&self, config: LoadedConfig) -> anyhow::Result<i32> {
        let mut config = match config.or_report() {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        if let Some(ref dir) = self.output_dir {
            config.export.output_dir = dir.clone();
        }
        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
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
        let mut changes = workflow.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut inputs = FormInputs::default();

        tracing::info!(output_dir = %config.export.output_dir, "Interactive session started");
        println!("Type {RESET_COMMAND} to start over, {} to leave.", QUIT_COMMANDS[0]);

        loop {
            let snapshot = workflow.snapshot();
            println!();
            println!("{}", FormView::new(&snapshot, &inputs.collection, &inputs.file).render());
            print!("{}", if snapshot.is_confirmed() { "file name> " } else { "collection> " });
            std::io::stdout().flush()?;

            // Only changes made while waiting for input wake the prompt.
            changes.borrow_and_update();

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if handle_line(&workflow, &mut inputs, &line).await == LineAction::Quit {
                        break;
                    }
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if clear_if_reset(&workflow.snapshot(), &mut inputs) {
                        println!();
                        println!("Form cleared.");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    tracing::info!("Received Ctrl+C, leaving interactive session");
                    break;
                }
            }
        }

        drop(workflow);
        let _ = indicator.await;
        Ok(EXIT_OK)
    }
}

/// Empty the form once the workflow is back in its initial state
///
/// Returns whether anything was cleared.
fn clear_if_reset(snapshot: &WorkflowSnapshot, inputs: &mut FormInputs) -> bool {
    if !snapshot.is_cleared() || *inputs == FormInputs::default() {
        return false;
    }
    *inputs = FormInputs::default();
    true
}

/// Route one line of input
///
/// Commands are handled first. Otherwise the line is the collection name
/// until the collection is confirmed, and the file name after that.
async fn handle_line(workflow: &ExportWorkflow, inputs: &mut FormInputs, line: &str) -> LineAction {
    let line = line.trim();

    if QUIT_COMMANDS.contains(&line) {
        return LineAction::Quit;
    }
    if line == RESET_COMMAND {
        workflow.reset();
        *inputs = FormInputs::default();
        return LineAction::Reset;
    }

    let snapshot = workflow.snapshot();
    if !snapshot.is_confirmed() {
        inputs.collection = line.to_string();
        match workflow.check_existence(&inputs.collection).await {
            Ok(count) => tracing::debug!(documents = count, "Collection confirmed"),
            Err(e) => {
                tracing::debug!(error = %e, "Check failed");
                println!("{}", Notice::from_error(Operation::Check, &e));
            }
        }
        return LineAction::Check;
    }

    inputs.file = line.to_string();
    let collection = snapshot
        .collection_name
        .map(|c| c.into_inner())
        .unwrap_or_default();

    match workflow.export_collection(&collection, &inputs.file).await {
        Ok(summary) => {
            println!("{}", Notice::success(summary.message.clone()));
            println!(
                "  {} row(s), {} column(s) → {}",
                summary.record_count,
                summary.column_count,
                summary.path.display()
            );
        }
        Err(e) => {
            tracing::debug!(error = %e, "Export failed");
            println!("{}", Notice::from_error(Operation::Export, &e));
        }
    }
    LineAction::Export
}
