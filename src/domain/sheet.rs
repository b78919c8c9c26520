//! Tabular sheet model handed to spreadsheet writers

use serde::Serialize;

/// A single cell value in a sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

/// A labelled table: one header row of column names, then data rows
///
/// Every row has exactly `columns.len()` cells; `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Sheet {
    /// Worksheet name
    pub label: String,

    /// Column names, in header order
    pub columns: Vec<String>,

    /// Data rows, in retrieval order
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl Sheet {
    /// Create an empty sheet with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `(row, column name)`, if both exist and the cell is not empty
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Whether the sheet has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup() {
        let sheet = Sheet {
            label: "Data".to_string(),
            columns: vec!["id".to_string(), "x".to_string()],
            rows: vec![vec![Some(CellValue::Text("a".to_string())), None]],
        };

        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.column_count(), 2);
        assert_eq!(sheet.cell(0, "id"), Some(&CellValue::Text("a".to_string())));
        assert_eq!(sheet.cell(0, "x"), None);
        assert_eq!(sheet.cell(1, "id"), None);
        assert_eq!(sheet.cell(0, "missing"), None);
    }

    #[test]
    fn test_new_sheet_is_empty() {
        let sheet = Sheet::new("Data");
        assert!(sheet.is_empty());
        assert_eq!(sheet.label, "Data");
    }
}
