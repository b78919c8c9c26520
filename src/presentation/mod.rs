//! Terminal presentation of the export workflow
//!
//! - [`theme`] - Styles registered once at startup
//! - [`render`] - The form: labels, inputs, trigger enablement
//! - [`notice`] - Messages shown for outcomes and errors
//! - [`spinner`] - Loading indicator that follows the workflow state
//!
//! Nothing here talks to the store or the filesystem; everything is driven by
//! [`WorkflowSnapshot`](crate::core::workflow::WorkflowSnapshot).

pub mod notice;
pub mod render;
pub mod spinner;
pub mod theme;

pub use notice::{Notice, Operation, Severity};
pub use render::FormView;
pub use spinner::Spinner;
