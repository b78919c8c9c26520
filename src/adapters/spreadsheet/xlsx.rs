//! Office Open XML (.xlsx) writer
//!
//! Produces a minimal single-sheet workbook package:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! xl/workbook.xml
//! xl/_rels/workbook.xml.rels
//! xl/worksheets/sheet1.xml
//! xl/sharedStrings.xml
//! xl/styles.xml
//! ```
//!
//! Row 1 holds the column names (bold), data rows follow from row 2.

use super::strings::{escape_xml, SharedStrings};
use super::traits::SpreadsheetWriter;
use crate::config::schema::validate_sheet_label;
use crate::domain::ids::FileName;
use crate::domain::sheet::{CellValue, Sheet};
use crate::domain::{Result, WriteError};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::{SimpleFileOptions, ZipWriter};

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#
);

// Style 0 is the default, style 1 is the bold header.
const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font>"#,
    r#"<font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#
);

const HEADER_STYLE: u32 = 1;

/// Most characters a single cell may hold
pub const MAX_CELL_CHARS: usize = 32_767;

/// Spreadsheet writer producing `.xlsx` files in a fixed directory
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    output_dir: PathBuf,
}

impl XlsxWriter {
    /// Create a writer that places workbooks in `output_dir`
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Full path of the workbook for `file_name`
    pub fn target_path(&self, file_name: &FileName) -> PathBuf {
        self.output_dir.join(file_name.with_extension())
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn write_file(&self, sheet: &Sheet, file_name: &FileName) -> Result<PathBuf> {
        let bytes = build_workbook(sheet)?;
        let path = self.target_path(file_name);

        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).map_err(|e| WriteError::Output {
                path: self.output_dir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(&path, &bytes).map_err(|e| WriteError::Output {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            rows = sheet.row_count(),
            columns = sheet.column_count(),
            "Wrote workbook"
        );

        Ok(path)
    }

    fn describe(&self) -> String {
        format!("xlsx files in '{}'", self.output_dir.display())
    }
}

/// Build the complete workbook package in memory
///
/// # Errors
///
/// Returns [`WriteError::InvalidSheet`] if the label is not a legal sheet
/// name, a row's width differs from the header's, or a text cell is longer
/// than [`MAX_CELL_CHARS`].
pub fn build_workbook(sheet: &Sheet) -> Result<Vec<u8>> {
    validate_sheet_label(&sheet.label).map_err(WriteError::InvalidSheet)?;

    if let Some((idx, row)) = sheet
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != sheet.columns.len())
    {
        return Err(WriteError::InvalidSheet(format!(
            "row {} has {} cells, expected {}",
            idx + 1,
            row.len(),
            sheet.columns.len()
        ))
        .into());
    }

    check_text_lengths(sheet)?;

    let mut strings = SharedStrings::new();
    let worksheet = worksheet_xml(sheet, &mut strings).map_err(xml_error)?;
    let shared = strings.to_xml().map_err(xml_error)?;
    tracing::debug!(
        unique_strings = strings.unique_count(),
        string_cells = strings.reference_count(),
        "Built shared string table"
    );
    let workbook = workbook_xml(&sheet.label);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts: [(&str, &[u8]); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
        ("xl/workbook.xml", workbook.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.as_bytes()),
        ("xl/worksheets/sheet1.xml", worksheet.as_bytes()),
        ("xl/sharedStrings.xml", shared.as_bytes()),
        ("xl/styles.xml", STYLES_XML.as_bytes()),
    ];

    for (name, content) in parts {
        zip.start_file(name, options).map_err(WriteError::from)?;
        zip.write_all(content)
            .map_err(|e| WriteError::Package(format!("{name}: {e}")))?;
    }

    let cursor = zip.finish().map_err(WriteError::from)?;
    Ok(cursor.into_inner())
}

/// Excel column letters for a zero-based index: 0 → A, 25 → Z, 26 → AA
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn workbook_xml(label: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
            r#"</workbook>"#
        ),
        escape_xml(label)
    )
}

fn worksheet_xml(sheet: &Sheet, strings: &mut SharedStrings) -> std::result::Result<String, std::fmt::Error> {
    let letters: Vec<String> = (0..sheet.columns.len().max(1)).map(column_letter).collect();
    let last_row = sheet.rows.len() + 1;

    let mut xml = String::with_capacity(512 + sheet.rows.len() * sheet.columns.len() * 24);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    write!(xml, r#"<dimension ref="A1:{}{}"/>"#, letters[letters.len() - 1], last_row)?;
    xml.push_str(concat!(
        r#"<sheetViews><sheetView workbookViewId="0">"#,
        r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#,
        r#"</sheetView></sheetViews>"#
    ));
    xml.push_str("<sheetData>");

    write!(xml, r#"<row r="1">"#)?;
    for (col, name) in sheet.columns.iter().enumerate() {
        let idx = strings.intern(name);
        write!(
            xml,
            r#"<c r="{}1" s="{HEADER_STYLE}" t="s"><v>{idx}</v></c>"#,
            letters[col]
        )?;
    }
    xml.push_str("</row>");

    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = r + 2;
        write!(xml, r#"<row r="{row_num}">"#)?;
        for (col, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{row_num}", letters[col]);
            match cell {
                None => {}
                Some(CellValue::Text(text)) => {
                    let idx = strings.intern(text);
                    write!(xml, r#"<c r="{cell_ref}" t="s"><v>{idx}</v></c>"#)?;
                }
                Some(CellValue::Number(n)) if n.is_finite() => {
                    write!(xml, r#"<c r="{cell_ref}"><v>{n}</v></c>"#)?;
                }
                Some(CellValue::Number(n)) => {
                    let idx = strings.intern(&n.to_string());
                    write!(xml, r#"<c r="{cell_ref}" t="s"><v>{idx}</v></c>"#)?;
                }
                Some(CellValue::Boolean(b)) => {
                    write!(xml, r#"<c r="{cell_ref}" t="b"><v>{}</v></c>"#, u8::from(*b))?;
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

/// Reject header or text cells longer than [`MAX_CELL_CHARS`]
fn check_text_lengths(sheet: &Sheet) -> std::result::Result<(), WriteError> {
    let too_long = |text: &str| text.chars().count() > MAX_CELL_CHARS;

    if let Some(name) = sheet.columns.iter().find(|c| too_long(c)) {
        return Err(WriteError::InvalidSheet(format!(
            "column name '{}…' exceeds {MAX_CELL_CHARS} characters",
            name.chars().take(32).collect::<String>()
        )));
    }

    for (r, row) in sheet.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if let Some(CellValue::Text(text)) = cell {
                if too_long(text) {
                    return Err(WriteError::InvalidSheet(format!(
                        "cell {}{} has {} characters, the limit is {MAX_CELL_CHARS}",
                        column_letter(col),
                        r + 2,
                        text.chars().count()
                    )));
                }
            }
        }
    }
    Ok(())
}

fn xml_error(err: std::fmt::Error) -> WriteError {
    WriteError::Package(format!("XML write error: {err}"))
}
