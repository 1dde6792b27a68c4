//! Error types for api-snapshot
//!
//! This module defines the error hierarchy for the whole pipeline.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::validate::ValidationError;
use thiserror::Error;

/// The main error type for the snapshot pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Unexpected response payload: {message}")]
    Payload { message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ============================================================================
    // Data Quality Errors
    // ============================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ============================================================================
    // Transfer Errors
    // ============================================================================
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Transfer failed: {message}")]
    Transfer { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// Broad failure category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-2xx response while fetching
    Fetch,
    /// The batch could not be encoded to or decoded from Parquet
    Serialization,
    /// The data-quality gate rejected the batch
    Validation,
    /// Missing or malformed configuration
    Config,
    /// Upload transport failure
    Transfer,
    /// Local filesystem failure
    Io,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a payload error
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a transfer error
    pub fn transfer(message: impl Into<String>) -> Self {
        Self::Transfer {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidUrl(_)
            | Error::YamlParse(_) => ErrorKind::Config,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Timeout { .. }
            | Error::Payload { .. } => ErrorKind::Fetch,
            Error::Arrow(_) | Error::Parquet(_) | Error::Serialization { .. } => {
                ErrorKind::Serialization
            }
            Error::Validation(_) => ErrorKind::Validation,
            Error::ObjectStore(_) | Error::Transfer { .. } => ErrorKind::Transfer,
            Error::Io(_) | Error::FileNotFound { .. } => ErrorKind::Io,
        }
    }
}

/// Result type alias for api-snapshot
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("S3_BUCKET");
        assert_eq!(err.to_string(), "Missing required config field: S3_BUCKET");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: Error = ValidationError::EmptyBatch.into();
        assert_eq!(err.to_string(), "Data quality failed: file has 0 rows");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::http_status(500, "").kind(), ErrorKind::Fetch);
        assert_eq!(Error::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Fetch);
        assert_eq!(Error::payload("x").kind(), ErrorKind::Fetch);
        assert_eq!(Error::serialization("x").kind(), ErrorKind::Serialization);
        assert_eq!(Error::missing_field("x").kind(), ErrorKind::Config);
        assert_eq!(Error::transfer("x").kind(), ErrorKind::Transfer);
        assert_eq!(
            Error::FileNotFound {
                path: "a".to_string()
            }
            .kind(),
            ErrorKind::Io
        );
    }
}
