//! User-supplied name types with validation
//!
//! Newtype wrappers for the two names the workflow takes from the user. Each
//! constructor rejects input that would be refused before reaching the
//! network or the filesystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validation message for a blank collection name
pub const MISSING_COLLECTION_NAME: &str = "missing collection name";

/// Validation message for a blank file name
pub const MISSING_FILE_NAME: &str = "missing file name";

/// Name of a collection in the document store
///
/// # Examples
///
/// ```
/// use docsheet::domain::ids::CollectionName;
/// use std::str::FromStr;
///
/// let name = CollectionName::from_str("users").unwrap();
/// assert_eq!(name.as_str(), "users");
/// assert!(CollectionName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Creates a new CollectionName, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// Returns `Err` when the name is empty after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MISSING_COLLECTION_NAME.to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CollectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Base name of the output spreadsheet, without extension
///
/// The export stage appends [`FileName::EXTENSION`]. Path separators are
/// rejected so the file always lands inside the output directory.
///
/// # Examples
///
/// ```
/// use docsheet::domain::ids::FileName;
///
/// let name = FileName::new("report").unwrap();
/// assert_eq!(name.with_extension(), "report.xlsx");
/// assert!(FileName::new("../report").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct FileName(String);

impl FileName {
    /// Extension appended to every exported file
    pub const EXTENSION: &'static str = "xlsx";

    /// Creates a new FileName, trimming surrounding whitespace
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MISSING_FILE_NAME.to_string());
        }
        if trimmed.contains(['/', '\\']) {
            return Err(format!(
                "file name '{trimmed}' must not contain path separators"
            ));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(format!("file name '{trimmed}' is not a valid base name"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the base name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base name with the spreadsheet extension appended
    pub fn with_extension(&self) -> String {
        format!("{}.{}", self.0, Self::EXTENSION)
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FileName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
