//! External system integrations for Docsheet.
//!
//! - [`store`] - Document store abstraction ([`store::DocumentStore`])
//! - [`firestore`] - Cloud Firestore REST implementation
//! - [`spreadsheet`] - Workbook writers ([`spreadsheet::SpreadsheetWriter`])
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The workflow only sees the
//! two traits; concrete clients are wired up by the CLI.
//!
//! ```rust,no_run
//! use docsheet::adapters::firestore::FirestoreClient;
//! use docsheet::adapters::spreadsheet::XlsxWriter;
//! use docsheet::config::FirestoreConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FirestoreClient::new(FirestoreConfig {
//!     project_id: "my-project".to_string(),
//!     ..Default::default()
//! })?;
//! let writer = XlsxWriter::new("exports");
//! # Ok(())
//! # }
//! ```

pub mod firestore;
pub mod spreadsheet;
pub mod store;
