//! Firestore REST API models
//!
//! Wire types for `projects.databases.documents.list` and the conversion of
//! Firestore's typed values into [`FieldValue`].

use crate::domain::record::FieldValue;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Response body of a list-documents call
///
/// An empty collection comes back as `{}`, hence the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl ListDocumentsResponse {
    /// Token for the next page, if there is one
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// A single Firestore document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    /// Full resource name:
    /// `projects/{p}/databases/{d}/documents/{collection}/{id}`
    pub name: String,

    #[serde(default)]
    pub fields: BTreeMap<String, FirestoreValue>,

    #[serde(default)]
    pub create_time: Option<String>,

    #[serde(default)]
    pub update_time: Option<String>,
}

impl FirestoreDocument {
    /// Document id: the last segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Integer values are string-encoded on the wire; the emulator has been seen
/// sending bare numbers too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerRepr {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<FirestoreValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, FirestoreValue>,
}

/// A typed Firestore value, e.g. `{"integerValue": "42"}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    NullValue(()),
    BooleanValue(bool),
    IntegerValue(IntegerRepr),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

impl FirestoreValue {
    /// Convert into the domain value union
    ///
    /// Timestamps that fail to parse as RFC 3339 are kept as text. Bytes stay
    /// base64-encoded and references stay as resource names.
    ///
    /// # Errors
    ///
    /// Returns a description of the offending value when an integer does not
    /// fit in `i64`.
    pub fn into_field_value(self) -> Result<FieldValue, String> {
        let value = match self {
            FirestoreValue::NullValue(()) => FieldValue::Null,
            FirestoreValue::BooleanValue(b) => FieldValue::Boolean(b),
            FirestoreValue::IntegerValue(IntegerRepr::Number(n)) => FieldValue::Integer(n),
            FirestoreValue::IntegerValue(IntegerRepr::Text(text)) => {
                let n = text
                    .parse::<i64>()
                    .map_err(|e| format!("invalid integerValue '{text}': {e}"))?;
                FieldValue::Integer(n)
            }
            FirestoreValue::DoubleValue(d) => FieldValue::Double(d),
            FirestoreValue::TimestampValue(ts) => match DateTime::parse_from_rfc3339(&ts) {
                Ok(parsed) => FieldValue::Timestamp(parsed.with_timezone(&Utc)),
                Err(_) => FieldValue::String(ts),
            },
            FirestoreValue::StringValue(s)
            | FirestoreValue::BytesValue(s)
            | FirestoreValue::ReferenceValue(s) => FieldValue::String(s),
            FirestoreValue::GeoPointValue(point) => {
                let mut map = BTreeMap::new();
                map.insert("latitude".to_string(), FieldValue::Double(point.latitude));
                map.insert("longitude".to_string(), FieldValue::Double(point.longitude));
                FieldValue::Map(map)
            }
            FirestoreValue::ArrayValue(array) => FieldValue::Array(
                array
                    .values
                    .into_iter()
                    .map(FirestoreValue::into_field_value)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            FirestoreValue::MapValue(map) => FieldValue::Map(convert_fields(map.fields)?),
        };
        Ok(value)
    }
}

/// Convert a Firestore field map into domain fields
pub fn convert_fields(
    fields: BTreeMap<String, FirestoreValue>,
) -> Result<BTreeMap<String, FieldValue>, String> {
    fields
        .into_iter()
        .map(|(name, value)| {
            value
                .into_field_value()
                .map(|v| (name.clone(), v))
                .map_err(|e| format!("field '{name}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(raw: serde_json::Value) -> FieldValue {
        serde_json::from_value::<FirestoreValue>(raw)
            .unwrap()
            .into_field_value()
            .unwrap()
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(value(json!({"nullValue": null})), FieldValue::Null);
        assert_eq!(value(json!({"booleanValue": true})), FieldValue::Boolean(true));
        assert_eq!(value(json!({"integerValue": "42"})), FieldValue::Integer(42));
        assert_eq!(value(json!({"integerValue": 7})), FieldValue::Integer(7));
        assert_eq!(value(json!({"doubleValue": 1.5})), FieldValue::Double(1.5));
        assert_eq!(
            value(json!({"stringValue": "hello"})),
            FieldValue::String("hello".to_string())
        );
        assert_eq!(
            value(json!({"referenceValue": "projects/p/databases/(default)/documents/users/u1"})),
            FieldValue::String("projects/p/databases/(default)/documents/users/u1".to_string())
        );
    }

    #[test]
    fn test_timestamp_value() {
        let parsed = value(json!({"timestampValue": "2024-05-01T12:30:00.123456Z"}));
        match parsed {
            FieldValue::Timestamp(ts) => {
                assert_eq!(ts.to_rfc3339(), "2024-05-01T12:30:00.123456+00:00")
            }
            other => panic!("expected timestamp, got {other:?}"),
        }

        assert_eq!(
            value(json!({"timestampValue": "yesterday"})),
            FieldValue::String("yesterday".to_string())
        );
    }

    #[test]
    fn test_nested_values() {
        let parsed = value(json!({
            "mapValue": {
                "fields": {
                    "tags": {"arrayValue": {"values": [{"stringValue": "a"}, {"integerValue": "2"}]}},
                    "empty": {"arrayValue": {}},
                    "where": {"geoPointValue": {"latitude": 51.5, "longitude": -0.12}}
                }
            }
        }));

        let FieldValue::Map(map) = parsed else {
            panic!("expected map");
        };
        assert_eq!(
            map["tags"],
            FieldValue::Array(vec![FieldValue::String("a".to_string()), FieldValue::Integer(2)])
        );
        assert_eq!(map["empty"], FieldValue::Array(vec![]));
        let FieldValue::Map(point) = &map["where"] else {
            panic!("expected geo point map");
        };
        assert_eq!(point["latitude"], FieldValue::Double(51.5));
    }

    #[test]
    fn test_invalid_integer_reports_field() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "count".to_string(),
            FirestoreValue::IntegerValue(IntegerRepr::Text("99999999999999999999".to_string())),
        );
        let err = convert_fields(fields).unwrap_err();
        assert!(err.contains("count"));
    }

    #[test]
    fn test_list_response_and_document_id() {
        let response: ListDocumentsResponse = serde_json::from_value(json!({
            "documents": [{
                "name": "projects/demo/databases/(default)/documents/users/alice",
                "fields": {"age": {"integerValue": "30"}},
                "createTime": "2024-01-01T00:00:00Z",
                "updateTime": "2024-01-02T00:00:00Z"
            }],
            "nextPageToken": ""
        }))
        .unwrap();

        assert_eq!(response.documents.len(), 1);
        assert_eq!(response.documents[0].id(), "alice");
        assert_eq!(response.next_page(), None);

        let empty: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.documents.is_empty());
    }
}
