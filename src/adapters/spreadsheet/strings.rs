//! Shared strings table for SpreadsheetML
//!
//! Text cells reference strings by index into `xl/sharedStrings.xml`, so a
//! value repeated across rows is stored once.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Escape text for use in XML content or attribute values
///
/// Characters that XML 1.0 cannot carry at all (control characters other
/// than tab, newline and carriage return) are dropped.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c.is_control() && (c as u32) < 0x20 => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Deduplicating table of cell strings
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    references: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `s` in the table, inserting it on first use
    pub fn intern(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    /// Number of distinct strings
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    /// Number of cells referencing the table
    pub fn reference_count(&self) -> usize {
        self.references
    }

    /// Serialize as `xl/sharedStrings.xml`
    pub fn to_xml(&self) -> Result<String, std::fmt::Error> {
        let mut xml = String::with_capacity(256 + self.strings.len() * 16);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.references,
            self.strings.len()
        )?;

        for s in &self.strings {
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s))?;
            } else {
                write!(xml, "<si><t>{}</t></si>", escape_xml(s))?;
            }
        }

        xml.push_str("</sst>");
        Ok(xml)
    }
}
