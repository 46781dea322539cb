//! Report generation errors.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors from report generation and payload encoding.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Dataset serialization failed.
    #[error("dataset serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Compression or decompression failed.
    #[error("payload compression failed: {0}")]
    Compression(#[from] std::io::Error),

    /// Embedded payload is not valid base64.
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
