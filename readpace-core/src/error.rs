//! Error types for Readpace Core

use thiserror::Error;

/// Result type alias using ReadpaceError
pub type Result<T> = std::result::Result<T, ReadpaceError>;

/// Top-level error type for all Readpace operations
#[derive(Debug, Error)]
pub enum ReadpaceError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while extracting text from a source document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Invalid markup: {0}")]
    InvalidMarkup(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Corrupt record {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors reported by a delivery backend
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery is disabled")]
    Disabled,

    #[error("Delivery not configured: {0}")]
    NotConfigured(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}
