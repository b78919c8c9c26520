//! Domain error types
//!
//! This module defines the error hierarchy for Docsheet. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Docsheet error type
///
/// Every workflow operation reports one of these. The first four variants are
/// the workflow taxonomy (validation, empty collection, store query, write);
/// the rest cover configuration and plumbing around it.
#[derive(Debug, Error)]
pub enum DocsheetError {
    /// Missing or malformed user input. Never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The query succeeded but the collection holds no documents
    #[error("No data available in the \"{0}\" collection")]
    EmptyCollection(String),

    /// Document store transport or query failure
    #[error("Store query error: {0}")]
    StoreQuery(#[from] StoreError),

    /// Spreadsheet generation or file write failure
    #[error("Spreadsheet write error: {0}")]
    Write(#[from] WriteError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl DocsheetError {
    /// Whether the user can recover by changing their input and re-triggering
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            DocsheetError::Validation(_) | DocsheetError::EmptyCollection(_)
        )
    }
}

/// Document store errors
///
/// Errors that occur while querying the remote document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Permission denied (401/403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Invalid request (bad URL, bad collection path)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Spreadsheet writer errors
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sheet could not be laid out (e.g. too many columns)
    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),

    /// Failed to build the xlsx package
    #[error("Failed to build workbook package: {0}")]
    Package(String),

    /// Failed to write the output file
    #[error("Failed to write output file {path}: {message}")]
    Output { path: String, message: String },

    /// The blocking write task was aborted or panicked
    #[error("Write task failed: {0}")]
    Task(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for DocsheetError {
    fn from(err: std::io::Error) -> Self {
        DocsheetError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DocsheetError {
    fn from(err: serde_json::Error) -> Self {
        DocsheetError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DocsheetError {
    fn from(err: toml::de::Error) -> Self {
        DocsheetError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<zip::result::ZipError> for WriteError {
    fn from(err: zip::result::ZipError) -> Self {
        WriteError::Package(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_display() {
        let err = DocsheetError::EmptyCollection("users".to_string());
        assert_eq!(
            err.to_string(),
            "No data available in the \"users\" collection"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::ConnectionFailed("Network error".to_string());
        let err: DocsheetError = store_err.into();
        assert!(matches!(err, DocsheetError::StoreQuery(_)));
        assert!(err.to_string().contains("Network error"));
    }

    #[test]
    fn test_write_error_conversion() {
        let write_err = WriteError::Package("bad zip".to_string());
        let err: DocsheetError = write_err.into();
        assert!(matches!(err, DocsheetError::Write(_)));
    }

    #[test]
    fn test_server_error_display() {
        let err = StoreError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 503 - unavailable");
    }

    #[test]
    fn test_user_recoverable() {
        assert!(DocsheetError::Validation("x".to_string()).is_user_recoverable());
        assert!(DocsheetError::EmptyCollection("x".to_string()).is_user_recoverable());
        assert!(!DocsheetError::StoreQuery(StoreError::Timeout("x".to_string()))
            .is_user_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: DocsheetError = io_err.into();
        assert!(matches!(err, DocsheetError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: DocsheetError = toml_err.into();
        assert!(matches!(err, DocsheetError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = DocsheetError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = WriteError::Task("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
