//! Spreadsheet writer abstraction

use crate::domain::ids::FileName;
use crate::domain::sheet::Sheet;
use crate::domain::Result;
use std::path::PathBuf;

/// Renders a [`Sheet`] into a workbook file
///
/// Writers are synchronous; the workflow runs them on the blocking pool.
pub trait SpreadsheetWriter: Send + Sync {
    /// Write `sheet` as a single-sheet workbook named after `file_name`
    ///
    /// Returns the path of the file that was written. An existing file with
    /// the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DocsheetError::Write`] if the sheet is
    /// malformed or the file cannot be written.
    fn write_file(&self, sheet: &Sheet, file_name: &FileName) -> Result<PathBuf>;

    /// Where files end up, for logs
    fn describe(&self) -> String;
}
