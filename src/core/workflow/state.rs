//! Observable workflow state

use crate::domain::ids::{CollectionName, FileName};
use std::fmt;
use uuid::Uuid;

/// Where the workflow is in the check → export sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing confirmed yet
    #[default]
    Idle,
    /// Existence check in flight
    CheckingExistence,
    /// The collection has documents; export is allowed
    Confirmed,
    /// Export in flight
    Exporting,
    /// The last export finished; a deferred reset is pending
    ExportSucceeded,
}

impl Stage {
    /// Whether an export may be started from this stage
    pub fn allows_export(self) -> bool {
        matches!(self, Stage::Confirmed | Stage::ExportSucceeded)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::CheckingExistence => "checking",
            Stage::Confirmed => "confirmed",
            Stage::Exporting => "exporting",
            Stage::ExportSucceeded => "exported",
        };
        f.write_str(s)
    }
}

/// Point-in-time view of the workflow, published on a watch channel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowSnapshot {
    pub stage: Stage,

    /// An operation is in flight
    pub loading: bool,

    /// Collection of the current pass
    pub collection_name: Option<CollectionName>,

    /// Document count seen by the last successful check
    pub document_count: Option<usize>,

    /// Base name used by the current or last export
    pub file_name: Option<FileName>,

    /// Set only while the stage is [`Stage::ExportSucceeded`]
    pub success_message: Option<String>,

    /// Identifies the pass that produced this state
    pub pass_id: Option<Uuid>,
}

impl WorkflowSnapshot {
    /// Whether the collection has been confirmed to hold documents
    pub fn is_confirmed(&self) -> bool {
        self.stage.allows_export()
    }

    /// Whether `collection` is the confirmed collection
    pub fn is_confirmed_for(&self, collection: &CollectionName) -> bool {
        self.is_confirmed() && self.collection_name.as_ref() == Some(collection)
    }

    /// Whether the snapshot equals the initial, cleared state
    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }
}

/// Text shown after a successful export
pub fn success_message(file_name: &FileName) -> String {
    format!("\"{}\" exported successfully!", file_name.with_extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cleared_idle() {
        let snapshot = WorkflowSnapshot::default();
        assert_eq!(snapshot.stage, Stage::Idle);
        assert!(!snapshot.loading);
        assert!(snapshot.is_cleared());
        assert!(!snapshot.is_confirmed());
    }

    #[test]
    fn test_is_confirmed_for() {
        let users = CollectionName::new("users").unwrap();
        let orders = CollectionName::new("orders").unwrap();
        let snapshot = WorkflowSnapshot {
            stage: Stage::Confirmed,
            collection_name: Some(users.clone()),
            ..Default::default()
        };

        assert!(snapshot.is_confirmed_for(&users));
        assert!(!snapshot.is_confirmed_for(&orders));
    }

    #[test]
    fn test_success_message() {
        let file_name = FileName::new("report").unwrap();
        assert_eq!(success_message(&file_name), "\"report.xlsx\" exported successfully!");
    }
}
