//! Domain models and types for Docsheet.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated user input** ([`CollectionName`], [`FileName`])
//! - **Record model** ([`ExportRecord`], [`FieldValue`])
//! - **Sheet model** ([`Sheet`], [`CellValue`])
//! - **Error types** ([`DocsheetError`], [`StoreError`], [`WriteError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Names typed by the user are newtypes, so a collection name can never be
//! passed where an output file name is expected:
//!
//! ```rust
//! use docsheet::domain::{CollectionName, FileName};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collection = CollectionName::new("users")?;
//! let file_name = FileName::new("users-2025")?;
//!
//! // let wrong: FileName = collection;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod sheet;

// Re-export commonly used types for convenience
pub use errors::{DocsheetError, StoreError, WriteError};
pub use ids::{CollectionName, FileName};
pub use record::{ExportRecord, FieldValue};
pub use result::Result;
pub use sheet::{CellValue, Sheet};
