//! Domain error types
//!
//! This module defines the error hierarchy for cwl-export.
//! AWS SDK error types never cross the adapter boundary; adapters render them
//! into the string payloads carried here.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ExportToolError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Log catalog (CloudWatch Logs) errors
    #[error("Log catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration store (DynamoDB) errors
    #[error("Configuration store error: {0}")]
    Store(#[from] StoreError),

    /// Operator input that cannot be recovered by re-prompting
    #[error("Input error: {0}")]
    Input(String),

    /// Terminal input ended while a prompt was waiting for an answer
    #[error("Input closed before a selection was confirmed")]
    InputClosed,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by the CloudWatch Logs side: listing log groups and
/// creating export tasks.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// DescribeLogGroups failed
    #[error("Failed to list log groups: {0}")]
    ListFailed(String),

    /// CreateExportTask was rejected (task already running, empty window, ...)
    #[error("{0}")]
    ExportRejected(String),
}

/// Errors raised by the configuration table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// PutItem failed
    #[error("Failed to write record for {log_group}: {message}")]
    PutFailed { log_group: String, message: String },

    /// Scan failed
    #[error("Failed to scan configuration table: {0}")]
    ScanFailed(String),

    /// An item is missing a required attribute or has the wrong type
    #[error("Malformed configuration record: {0}")]
    MalformedRecord(String),
}

impl From<std::io::Error> for ExportToolError {
    fn from(err: std::io::Error) -> Self {
        ExportToolError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportToolError {
    fn from(err: serde_json::Error) -> Self {
        ExportToolError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExportToolError {
    fn from(err: toml::de::Error) -> Self {
        ExportToolError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportToolError::Configuration("table_name is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: table_name is empty");
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: ExportToolError = CatalogError::ListFailed("throttled".to_string()).into();
        assert!(matches!(err, ExportToolError::Catalog(_)));
        assert_eq!(
            err.to_string(),
            "Log catalog error: Failed to list log groups: throttled"
        );
    }

    #[test]
    fn test_export_rejected_is_bare_message() {
        let err = CatalogError::ExportRejected("LimitExceededException".to_string());
        assert_eq!(err.to_string(), "LimitExceededException");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ExportToolError = StoreError::PutFailed {
            log_group: "/aws/lambda/app".to_string(),
            message: "AccessDenied".to_string(),
        }
        .into();
        assert!(matches!(err, ExportToolError::Store(_)));
        assert!(err.to_string().contains("/aws/lambda/app"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ExportToolError = io_err.into();
        assert!(matches!(err, ExportToolError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ExportToolError = toml_err.into();
        assert!(matches!(err, ExportToolError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
