//! Export summary and reporting

use crate::domain::ids::{CollectionName, FileName};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Result of a successful export pass
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Collection that was exported
    pub collection: CollectionName,

    /// Base name the user asked for
    pub file_name: FileName,

    /// Path of the written workbook
    pub path: PathBuf,

    /// Number of data rows written
    pub record_count: usize,

    /// Number of columns in the sheet, `id` included
    pub column_count: usize,

    /// Wall time of the pass, query and write included
    pub duration: Duration,

    /// When the workbook was written
    pub exported_at: DateTime<Utc>,

    /// User-facing confirmation text
    pub message: String,
}

impl ExportSummary {
    /// Records written per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return self.record_count as f64;
        }
        self.record_count as f64 / secs
    }
}
