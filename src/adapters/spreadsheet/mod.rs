//! Spreadsheet output
//!
//! - [`traits`] - The [`SpreadsheetWriter`] seam used by the workflow
//! - [`xlsx`] - Office Open XML workbook writer
//! - [`strings`] - Shared strings table and XML escaping

pub mod strings;
pub mod traits;
pub mod xlsx;

pub use traits::SpreadsheetWriter;
pub use xlsx::XlsxWriter;
