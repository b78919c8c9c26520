// Docsheet - Firestore collection to Excel exporter
// Copyright (c) 2025 Docsheet Contributors
// Licensed under the MIT License

//! # Docsheet - Firestore collection to Excel exporter
//!
//! Docsheet exports every document of a Cloud Firestore collection to an
//! `.xlsx` workbook in two stages: first confirm the collection holds data,
//! then export it under a file name of the user's choosing.
//!
//! ## Architecture
//!
//! Docsheet follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`presentation`] - Terminal form, notices and loading indicator
//! - [`core`] - The export workflow and record tabulation
//! - [`adapters`] - External integrations (Firestore, xlsx writer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docsheet::config::load_config;
//! use docsheet::core::workflow::ExportWorkflow;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("docsheet.toml")?;
//!     let workflow = ExportWorkflow::from_config(&config)?;
//!
//!     workflow.check_existence("users").await?;
//!     let summary = workflow.export_collection("users", "users").await?;
//!
//!     println!("{}", summary.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Observing the workflow
//!
//! State is published on a watch channel. After a successful export the
//! state returns to idle on its own once the reset delay elapses:
//!
//! ```rust,no_run
//! # use docsheet::core::workflow::ExportWorkflow;
//! # async fn example(workflow: ExportWorkflow) {
//! let mut changes = workflow.subscribe();
//! while changes.changed().await.is_ok() {
//!     let snapshot = changes.borrow_and_update().clone();
//!     println!("{} (loading: {})", snapshot.stage, snapshot.loading);
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Docsheet uses the [`domain::DocsheetError`] type for all errors:
//!
//! ```rust,no_run
//! use docsheet::domain::DocsheetError;
//!
//! fn example() -> Result<(), DocsheetError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = docsheet::config::load_config("docsheet.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod presentation;
