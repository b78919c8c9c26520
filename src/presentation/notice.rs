//! User-facing notices for workflow outcomes

use crate::domain::ids::{MISSING_COLLECTION_NAME, MISSING_FILE_NAME};
use crate::domain::DocsheetError;
use std::fmt;

/// Which trigger produced the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Check,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A message to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    /// Translate a workflow error into the text shown to the user
    ///
    /// Input problems and empty collections get specific wording; store and
    /// write failures get a generic message per operation, the details go to
    /// the log.
    pub fn from_error(operation: Operation, err: &DocsheetError) -> Self {
        match err {
            DocsheetError::Validation(msg) if msg == MISSING_COLLECTION_NAME => {
                Self::warning("Please enter a collection name.")
            }
            DocsheetError::Validation(msg) if msg == MISSING_FILE_NAME => {
                Self::warning("Please enter a file name.")
            }
            DocsheetError::Validation(msg) => Self::warning(sentence(msg)),
            DocsheetError::EmptyCollection(name) => {
                Self::warning(format!("No data available in the \"{name}\" collection."))
            }
            _ => match operation {
                Operation::Check => Self::error("An error occurred while checking the collection."),
                Operation::Export => Self::error("An error occurred while exporting data."),
            },
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.severity {
            Severity::Success => "✔",
            Severity::Warning => "!",
            Severity::Error => "✖",
        };
        write!(f, "{marker} {}", self.text)
    }
}

/// Capitalise and terminate a validation message
fn sentence(msg: &str) -> String {
    let mut chars = msg.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}
