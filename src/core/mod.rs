//! Core business logic for Docsheet.
//!
//! # Modules
//!
//! - [`workflow`] - The two-stage check/export workflow and its observable state
//! - [`transform`] - Tabulation of records into a sheet
//!
//! # Export Workflow
//!
//! 1. **Check**: Query the collection and confirm it holds documents
//! 2. **Export**: Query again, tabulate the records, write `<name>.xlsx`
//! 3. **Reset**: Clear the state a few seconds after a successful export
//!
//! # Example
//!
//! ```rust,no_run
//! use docsheet::config::load_config;
//! use docsheet::core::workflow::ExportWorkflow;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docsheet.toml")?;
//! let workflow = ExportWorkflow::from_config(&config)?;
//!
//! workflow.check_existence("users").await?;
//! let summary = workflow.export_collection("users", "users").await?;
//!
//! println!("Rows: {}", summary.record_count);
//! println!("File: {}", summary.path.display());
//! # Ok(())
//! # }
//! ```

pub mod transform;
pub mod workflow;
