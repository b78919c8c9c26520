//! Export workflow orchestration
//!
//! - [`engine`] - [`ExportWorkflow`], the check and export operations
//! - [`state`] - [`WorkflowSnapshot`] published to the presentation layer
//! - [`summary`] - [`ExportSummary`] returned by a successful export

pub mod engine;
pub mod state;
pub mod summary;

pub use engine::{ExportWorkflow, WorkflowSettings, DEFAULT_RESET_DELAY, DEFAULT_SHEET_LABEL};
pub use state::{success_message, Stage, WorkflowSnapshot};
pub use summary::ExportSummary;
