//! Exported record model
//!
//! Documents read from the store carry loosely typed JSON-like values. They
//! are mapped onto [`FieldValue`], a closed tagged union, and paired with the
//! document identifier to form an [`ExportRecord`], one spreadsheet row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Column name under which the document identifier is exported
pub const ID_FIELD: &str = "id";

/// A single document field value
///
/// Serializes untagged, so nested values render as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// One retrieved document, ready to become a spreadsheet row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    /// Document identifier
    pub id: String,

    /// Document fields, ordered by name
    pub fields: BTreeMap<String, FieldValue>,
}

impl ExportRecord {
    /// Creates a record from a document id and its fields
    pub fn new(id: impl Into<String>, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Flattens the record into ordered `(column, value)` pairs
    ///
    /// The identifier comes first under [`ID_FIELD`]. A document field that is
    /// itself named `id` replaces the identifier value in that first column.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsheet::domain::record::{ExportRecord, FieldValue};
    /// use std::collections::BTreeMap;
    ///
    /// let mut fields = BTreeMap::new();
    /// fields.insert("x".to_string(), FieldValue::Integer(1));
    /// let record = ExportRecord::new("a", fields);
    ///
    /// let row = record.to_row();
    /// assert_eq!(row[0].0, "id");
    /// assert_eq!(row[1].0, "x");
    /// ```
    pub fn to_row(&self) -> Vec<(&str, FieldValue)> {
        let mut row = Vec::with_capacity(self.fields.len() + 1);

        // Keep the identifier column first even when overridden.
        let id_cell = self
            .fields
            .get(ID_FIELD)
            .cloned()
            .unwrap_or_else(|| FieldValue::String(self.id.clone()));
        row.push((ID_FIELD, id_cell));

        for (name, value) in &self.fields {
            if name != ID_FIELD {
                row.push((name.as_str(), value.clone()));
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_to_row_puts_id_first() {
        let record = ExportRecord::new(
            "doc-1",
            fields(&[("name", "Ada".into()), ("age", 36_i64.into())]),
        );

        let row = record.to_row();
        let columns: Vec<&str> = row.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["id", "age", "name"]);
        assert_eq!(row[0].1, FieldValue::String("doc-1".to_string()));
    }

    #[test]
    fn test_to_row_document_id_field_wins() {
        let record = ExportRecord::new("doc-1", fields(&[("id", 42_i64.into())]));

        let row = record.to_row();
        assert_eq!(row.len(), 1);
        assert_eq!(row[0], ("id", FieldValue::Integer(42)));
    }

    #[test]
    fn test_to_row_without_fields() {
        let record = ExportRecord::new("only-id", BTreeMap::new());
        assert_eq!(
            record.to_row(),
            vec![("id", FieldValue::String("only-id".to_string()))]
        );
    }

    #[test]
    fn test_nested_values_serialize_as_plain_json() {
        let value = FieldValue::Map(fields(&[
            ("tags", FieldValue::Array(vec!["a".into(), "b".into()])),
            ("active", true.into()),
            ("note", FieldValue::Null),
        ]));

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"active":true,"note":null,"tags":["a","b"]}"#
        );
    }
}
