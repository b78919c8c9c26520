//! Document store abstraction
//!
//! The workflow only needs one capability from the store: read every
//! document of a named collection.

use crate::domain::ids::CollectionName;
use crate::domain::record::{ExportRecord, FieldValue};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A document as returned by the store: identifier plus field map
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDocument {
    /// Document identifier, unique within its collection
    pub id: String,

    /// Top-level fields of the document
    pub fields: BTreeMap<String, FieldValue>,
}

impl StoreDocument {
    /// Create a new store document
    pub fn new(id: impl Into<String>, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

impl From<StoreDocument> for ExportRecord {
    fn from(doc: StoreDocument) -> Self {
        ExportRecord::new(doc.id, doc.fields)
    }
}

/// Query capability over a remote document store
///
/// Implementations return documents in the store's retrieval order; that
/// order becomes the row order of the exported sheet.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection`
    ///
    /// An empty vector means the collection has no documents (or does not
    /// exist; document stores don't distinguish the two).
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DocsheetError::StoreQuery`] on transport or
    /// permission failures.
    async fn query_all(&self, collection: &CollectionName) -> Result<Vec<StoreDocument>>;

    /// Human-readable description of the backing store, for logs
    fn describe(&self) -> String;
}
