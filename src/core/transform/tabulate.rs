//! Records to sheet tabulation
//!
//! Lays a list of records out as a table: one column per distinct field name,
//! one row per record, in retrieval order.

use crate::domain::record::{ExportRecord, FieldValue, ID_FIELD};
use crate::domain::sheet::{CellValue, Sheet};
use crate::domain::{DocsheetError, Result};
use chrono::SecondsFormat;
use std::collections::HashMap;

/// Largest integer magnitude a spreadsheet number cell holds exactly (2^53)
const MAX_EXACT_INTEGER: i64 = 9_007_199_254_740_992;

/// Tabulate records into a sheet labelled `label`
///
/// Columns are the union of all field names in first-seen order, with the
/// `id` column always first. A record missing a field gets an empty cell.
///
/// # Examples
///
/// ```
/// use docsheet::core::transform::tabulate::tabulate;
/// use docsheet::domain::record::{ExportRecord, FieldValue};
/// use std::collections::BTreeMap;
///
/// # fn example() -> docsheet::domain::Result<()> {
/// let mut fields = BTreeMap::new();
/// fields.insert("x".to_string(), FieldValue::Integer(1));
/// let records = vec![ExportRecord::new("a", fields)];
///
/// let sheet = tabulate(&records, "Data")?;
/// assert_eq!(sheet.columns, vec!["id", "x"]);
/// assert_eq!(sheet.row_count(), 1);
/// # Ok(())
/// # }
/// ```
pub fn tabulate(records: &[ExportRecord], label: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new(label);
    sheet.columns.push(ID_FIELD.to_string());

    let mut positions: HashMap<String, usize> = HashMap::new();
    positions.insert(ID_FIELD.to_string(), 0);

    let mut rows: Vec<Vec<(usize, Option<CellValue>)>> = Vec::with_capacity(records.len());
    for record in records {
        let mut cells = Vec::with_capacity(record.fields.len() + 1);
        for (name, value) in record.to_row() {
            let col = match positions.get(name) {
                Some(&col) => col,
                None => {
                    let col = sheet.columns.len();
                    sheet.columns.push(name.to_string());
                    positions.insert(name.to_string(), col);
                    col
                }
            };
            cells.push((col, to_cell(value)?));
        }
        rows.push(cells);
    }

    let width = sheet.columns.len();
    sheet.rows = rows
        .into_iter()
        .map(|cells| {
            let mut row = vec![None; width];
            for (col, cell) in cells {
                row[col] = cell;
            }
            row
        })
        .collect();

    Ok(sheet)
}

/// Convert a field value into a cell
///
/// Nested arrays and maps are rendered as compact JSON text. Timestamps are
/// rendered as RFC 3339 text in UTC. Integers too large for an exact number
/// cell are kept as text.
pub fn to_cell(value: FieldValue) -> Result<Option<CellValue>> {
    let cell = match value {
        FieldValue::Null => None,
        FieldValue::Boolean(b) => Some(CellValue::Boolean(b)),
        FieldValue::Integer(n) if n.unsigned_abs() <= MAX_EXACT_INTEGER as u64 => {
            Some(CellValue::Number(n as f64))
        }
        FieldValue::Integer(n) => Some(CellValue::Text(n.to_string())),
        FieldValue::Double(d) if d.is_finite() => Some(CellValue::Number(d)),
        FieldValue::Double(d) => Some(CellValue::Text(d.to_string())),
        FieldValue::String(s) => Some(CellValue::Text(s)),
        FieldValue::Timestamp(ts) => Some(CellValue::Text(
            ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )),
        nested @ (FieldValue::Array(_) | FieldValue::Map(_)) => {
            let json = serde_json::to_string(&nested).map_err(|e| {
                DocsheetError::Serialization(format!("Failed to render nested value: {e}"))
            })?;
            Some(CellValue::Text(json))
        }
    };
    Ok(cell)
}
