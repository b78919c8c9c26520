//! Two-stage export workflow
//!
//! Stage one confirms that a collection holds documents. Stage two re-reads
//! the collection, tabulates it and writes a workbook. After a successful
//! export the state clears itself once the reset delay has elapsed, unless a
//! newer pass has started in the meantime.

use super::state::{success_message, Stage, WorkflowSnapshot};
use super::summary::ExportSummary;
use crate::adapters::firestore::FirestoreClient;
use crate::adapters::spreadsheet::{SpreadsheetWriter, XlsxWriter};
use crate::adapters::store::DocumentStore;
use crate::config::{DocsheetConfig, ExportConfig};
use crate::core::transform::tabulate;
use crate::domain::ids::{CollectionName, FileName};
use crate::domain::record::ExportRecord;
use crate::domain::{DocsheetError, Result, WriteError};
use crate::{log_export_complete, log_export_start};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Delay before a successful export is cleared
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(8000);

/// Worksheet name used when none is configured
pub const DEFAULT_SHEET_LABEL: &str = "Data";

/// Tunables for [`ExportWorkflow`]
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    /// Worksheet name written into every workbook
    pub sheet_label: String,

    /// Time between a successful export and the automatic reset
    pub reset_delay: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            sheet_label: DEFAULT_SHEET_LABEL.to_string(),
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl From<&ExportConfig> for WorkflowSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            sheet_label: config.sheet_label.clone(),
            reset_delay: Duration::from_millis(config.reset_delay_ms),
        }
    }
}

/// Sets `loading` for as long as it is alive
struct LoadingGuard<'a> {
    state: &'a watch::Sender<WorkflowSnapshot>,
}

impl<'a> LoadingGuard<'a> {
    fn engage(state: &'a watch::Sender<WorkflowSnapshot>) -> Self {
        state.send_modify(|s| s.loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

/// Export workflow over a document store and a spreadsheet writer
///
/// # Example
///
/// ```rust,no_run
/// use docsheet::config::load_config;
/// use docsheet::core::workflow::ExportWorkflow;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("docsheet.toml")?;
/// let workflow = ExportWorkflow::from_config(&config)?;
///
/// let count = workflow.check_existence("users").await?;
/// println!("{count} documents");
///
/// let summary = workflow.export_collection("users", "users-2025").await?;
/// println!("{}", summary.message);
/// # Ok(())
/// # }
/// ```
pub struct ExportWorkflow {
    store: Arc<dyn DocumentStore>,
    writer: Arc<dyn SpreadsheetWriter>,
    settings: WorkflowSettings,
    state: Arc<watch::Sender<WorkflowSnapshot>>,
    pending_reset: Mutex<Option<JoinHandle<()>>>,
}

impl ExportWorkflow {
    /// Create a workflow from its collaborators
    pub fn new(
        store: Arc<dyn DocumentStore>,
        writer: Arc<dyn SpreadsheetWriter>,
        settings: WorkflowSettings,
    ) -> Self {
        let (state, _) = watch::channel(WorkflowSnapshot::default());
        Self {
            store,
            writer,
            settings,
            state: Arc::new(state),
            pending_reset: Mutex::new(None),
        }
    }

    /// Create a workflow backed by Firestore and the xlsx writer
    ///
    /// # Errors
    ///
    /// Returns [`DocsheetError::Configuration`] if the Firestore client
    /// cannot be built.
    pub fn from_config(config: &DocsheetConfig) -> Result<Self> {
        let store = Arc::new(FirestoreClient::new(config.firestore.clone())?);
        let writer = Arc::new(XlsxWriter::new(&config.export.output_dir));

        tracing::debug!(
            store = %store.describe(),
            writer = %writer.describe(),
            "Export workflow wired"
        );

        Ok(Self::new(store, writer, WorkflowSettings::from(&config.export)))
    }

    /// Workflow settings
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Current state
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.state.subscribe()
    }

    /// Confirm that `collection_name` holds at least one document
    ///
    /// Returns the number of documents found. On success the stage becomes
    /// [`Stage::Confirmed`]; on any failure it falls back to [`Stage::Idle`].
    ///
    /// # Errors
    ///
    /// - [`DocsheetError::Validation`] for a blank name (nothing is queried)
    /// - [`DocsheetError::EmptyCollection`] when the query returns nothing
    /// - [`DocsheetError::StoreQuery`] when the query fails
    pub async fn check_existence(&self, collection_name: &str) -> Result<usize> {
        let collection =
            CollectionName::new(collection_name).map_err(DocsheetError::Validation)?;

        let pass_id = self.begin_pass();
        self.state.send_modify(|s| {
            s.pass_id = Some(pass_id);
            s.stage = Stage::CheckingExistence;
            s.collection_name = Some(collection.clone());
            s.document_count = None;
            s.success_message = None;
        });
        let _loading = LoadingGuard::engage(&self.state);

        tracing::info!(collection = %collection, pass_id = %pass_id, "Checking collection");

        let outcome = match self.store.query_all(&collection).await {
            Ok(docs) if docs.is_empty() => {
                Err(DocsheetError::EmptyCollection(collection.to_string()))
            }
            Ok(docs) => Ok(docs.len()),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(count) => {
                let count = *count;
                self.state.send_modify(|s| {
                    s.stage = Stage::Confirmed;
                    s.document_count = Some(count);
                });
                tracing::info!(collection = %collection, documents = count, "Collection confirmed");
            }
            Err(e) => {
                self.state.send_modify(|s| s.stage = Stage::Idle);
                tracing::warn!(collection = %collection, error = %e, "Collection check failed");
            }
        }

        outcome
    }

    /// Export a confirmed collection to `<file_name>.xlsx`
    ///
    /// The collection is queried again; the result of the earlier check is
    /// not reused. On success the stage becomes [`Stage::ExportSucceeded`] and
    /// a reset is scheduled. On failure the stage returns to
    /// [`Stage::Confirmed`] so the user can retry.
    ///
    /// # Errors
    ///
    /// - [`DocsheetError::Validation`] for a blank or unusable file name, or
    ///   when `collection_name` is not the confirmed collection
    /// - [`DocsheetError::EmptyCollection`] when the collection emptied since
    ///   the check
    /// - [`DocsheetError::StoreQuery`] when the query fails
    /// - [`DocsheetError::Write`] when the workbook cannot be written
    pub async fn export_collection(
        &self,
        collection_name: &str,
        file_name: &str,
    ) -> Result<ExportSummary> {
        let file_name = FileName::new(file_name).map_err(DocsheetError::Validation)?;
        let collection =
            CollectionName::new(collection_name).map_err(DocsheetError::Validation)?;

        if !self.state.borrow().is_confirmed_for(&collection) {
            return Err(DocsheetError::Validation(format!(
                "collection \"{collection}\" has not been confirmed"
            )));
        }

        let pass_id = self.begin_pass();
        let started = Instant::now();
        self.state.send_modify(|s| {
            s.pass_id = Some(pass_id);
            s.stage = Stage::Exporting;
            s.file_name = Some(file_name.clone());
            s.success_message = None;
        });
        let _loading = LoadingGuard::engage(&self.state);

        log_export_start!(pass_id, collection, file_name);

        match self.write_collection(&collection, &file_name).await {
            Ok((path, record_count, column_count)) => {
                let message = success_message(&file_name);
                let duration = started.elapsed();
                self.state.send_modify(|s| {
                    s.stage = Stage::ExportSucceeded;
                    s.success_message = Some(message.clone());
                });
                self.schedule_reset(pass_id);

                log_export_complete!(pass_id, record_count, duration);

                Ok(ExportSummary {
                    collection,
                    file_name,
                    path,
                    record_count,
                    column_count,
                    duration,
                    exported_at: Utc::now(),
                    message,
                })
            }
            Err(e) => {
                self.state.send_modify(|s| s.stage = Stage::Confirmed);
                tracing::warn!(
                    collection = %collection,
                    file_name = %file_name,
                    error = %e,
                    "Export failed"
                );
                Err(e)
            }
        }
    }

    /// Start over: cancel any pending reset and clear all state
    pub fn reset(&self) {
        self.cancel_pending_reset();
        self.state.send_modify(|s| *s = WorkflowSnapshot::default());
        tracing::debug!("Workflow reset");
    }

    async fn write_collection(
        &self,
        collection: &CollectionName,
        file_name: &FileName,
    ) -> Result<(PathBuf, usize, usize)> {
        let documents = self.store.query_all(collection).await?;
        if documents.is_empty() {
            return Err(DocsheetError::EmptyCollection(collection.to_string()));
        }

        let records: Vec<ExportRecord> = documents.into_iter().map(ExportRecord::from).collect();
        let sheet = tabulate(&records, &self.settings.sheet_label)?;
        let record_count = sheet.row_count();
        let column_count = sheet.column_count();

        let writer = Arc::clone(&self.writer);
        let target = file_name.clone();
        let path = tokio::task::spawn_blocking(move || writer.write_file(&sheet, &target))
            .await
            .map_err(|e| WriteError::Task(e.to_string()))??;

        Ok((path, record_count, column_count))
    }

    /// Cancel any pending reset and mint the id of a new pass
    fn begin_pass(&self) -> Uuid {
        self.cancel_pending_reset();
        Uuid::new_v4()
    }

    fn cancel_pending_reset(&self) {
        let pending = self
            .pending_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }

    fn schedule_reset(&self, pass_id: Uuid) {
        let state = Arc::clone(&self.state);
        let delay = self.settings.reset_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let cleared = state.send_if_modified(|s| {
                if s.pass_id != Some(pass_id) {
                    return false;
                }
                *s = WorkflowSnapshot::default();
                true
            });
            if cleared {
                tracing::debug!(pass_id = %pass_id, "Export state cleared");
            }
        });

        let previous = self
            .pending_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for ExportWorkflow {
    fn drop(&mut self) {
        self.cancel_pending_reset();
    }
}
