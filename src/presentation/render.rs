//! Text rendering of the export form
//!
//! The form has two sections. The collection section is always shown; the
//! file section appears once the collection is confirmed.

use super::theme;
use crate::core::workflow::WorkflowSnapshot;

pub const TITLE: &str = "Export Data to Excel";
pub const COLLECTION_LABEL: &str = "Firestore Collection Name:";
pub const COLLECTION_PLACEHOLDER: &str = "Enter collection name";
pub const FILE_LABEL: &str = "Excel File Name:";
pub const FILE_PLACEHOLDER: &str = "Enter file name";
pub const CHECK_BUTTON: &str = "Check Collection";
pub const EXPORT_BUTTON: &str = "Export Data to Excel";

/// The form as seen for one snapshot and the current input values
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub snapshot: &'a WorkflowSnapshot,
    pub collection_input: &'a str,
    pub file_input: &'a str,
}

impl<'a> FormView<'a> {
    pub fn new(snapshot: &'a WorkflowSnapshot, collection_input: &'a str, file_input: &'a str) -> Self {
        Self {
            snapshot,
            collection_input,
            file_input,
        }
    }

    /// The collection input accepts edits
    pub fn collection_editable(&self) -> bool {
        !self.snapshot.loading && !self.snapshot.is_confirmed()
    }

    /// The check trigger is shown (until the collection is confirmed)
    pub fn check_visible(&self) -> bool {
        !self.snapshot.is_confirmed()
    }

    /// The check trigger can be activated
    pub fn check_enabled(&self) -> bool {
        self.check_visible() && !self.snapshot.loading && !self.collection_input.trim().is_empty()
    }

    /// The file section (input, export trigger, success message) is shown
    pub fn file_section_visible(&self) -> bool {
        self.snapshot.is_confirmed()
    }

    /// The export trigger can be activated
    pub fn export_enabled(&self) -> bool {
        self.file_section_visible() && !self.snapshot.loading && !self.file_input.trim().is_empty()
    }

    /// Render the form as plain text
    pub fn render(&self) -> String {
        let theme = theme::current();
        let rule = "─".repeat(theme.rule_width);
        let loading = self.snapshot.loading;

        let mut lines = vec![
            TITLE.to_string(),
            rule.clone(),
            COLLECTION_LABEL.to_string(),
            format!(
                "  {}{}",
                input_text(self.collection_input, COLLECTION_PLACEHOLDER),
                if self.collection_editable() { "" } else { "  (locked)" }
            ),
        ];
        if self.check_visible() {
            lines.push(button(CHECK_BUTTON, self.check_enabled(), loading));
        }

        if self.file_section_visible() {
            if let Some(count) = self.snapshot.document_count {
                lines.push(format!("  {count} document(s) found"));
            }
            lines.push(String::new());
            lines.push(FILE_LABEL.to_string());
            lines.push(format!("  {}", input_text(self.file_input, FILE_PLACEHOLDER)));
            lines.push(button(EXPORT_BUTTON, self.export_enabled(), loading));
            if let Some(ref message) = self.snapshot.success_message {
                lines.push(format!("✔ {message}"));
            }
        }

        lines.push(rule);
        lines.join("\n")
    }
}

fn input_text(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("<{placeholder}>")
    } else {
        value.to_string()
    }
}

fn button(label: &str, enabled: bool, loading: bool) -> String {
    match (loading, enabled) {
        (true, _) => format!("  [ … {label} ]"),
        (false, true) => format!("  [ {label} ]"),
        (false, false) => format!("  ( {label} )"),
    }
}
