//! Error types module
//!
//! All failures in the ingestion pipeline and the registry are unified under
//! the `AppError` enum. Each variant knows its HTTP status, a machine-readable
//! code, and the log level it should be reported at, so the API layer can
//! render errors without matching on variants itself.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    /// Extraction failure attributable to the uploaded archive itself
    /// (corrupt data, a path-escaping entry, resource caps exceeded).
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A per-course `meta.json` exists but cannot be parsed. Isolated to the
    /// affected course; listings fall back to a synthesized record.
    #[error("Corrupt course metadata: {0}")]
    MetadataCorrupt(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// HTTP status code to return
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Extraction(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::MetadataCorrupt(_) => 500,
            AppError::Internal(_) => 500,
            AppError::Io(_) => 500,
        }
    }

    /// Machine-readable error code (e.g. "VALIDATION_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MetadataCorrupt(_) => "METADATA_CORRUPT",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge(_) | AppError::NotFound(_) => {
                LogLevel::Debug
            }
            AppError::Extraction(_) | AppError::MetadataCorrupt(_) => LogLevel::Warn,
            AppError::Internal(_) | AppError::Io(_) => LogLevel::Error,
        }
    }
}
