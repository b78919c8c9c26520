//! Crate-wide result alias

use super::errors::DocsheetError;

/// Result of any fallible Docsheet operation
///
/// ```
/// use docsheet::domain::{CollectionName, DocsheetError, Result};
///
/// fn parse(name: &str) -> Result<CollectionName> {
///     CollectionName::new(name).map_err(DocsheetError::Validation)
/// }
///
/// assert!(parse("users").is_ok());
/// assert!(matches!(parse(" "), Err(DocsheetError::Validation(_))));
/// ```
pub type Result<T> = std::result::Result<T, DocsheetError>;
