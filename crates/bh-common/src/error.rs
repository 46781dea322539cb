//! Error types for the bumphunter analysis pipeline.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification identifying the failing stage
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! Malformed timestamps, missing optional columns, and empty input
//! tables are handled inline by the loader and never surface here.
//! Errors are reserved for conditions that stop a run (unreadable input,
//! invalid settings, failed output).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for bumphunter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories, one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings file and threshold errors.
    Config,
    /// CSV ingest and normalization errors.
    Ingest,
    /// Join detection errors.
    Detection,
    /// Profile aggregation and scoring errors.
    Aggregation,
    /// Report generation and payload encoding errors.
    Report,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Ingest => write!(f, "ingest"),
            ErrorCategory::Detection => write!(f, "detection"),
            ErrorCategory::Aggregation => write!(f, "aggregation"),
            ErrorCategory::Report => write!(f, "report"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the bumphunter pipeline.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid threshold: {value} is not a finite number of seconds")]
    InvalidThreshold { value: f64 },

    #[error("invalid settings file: {0}")]
    InvalidSettings(String),

    // Ingest errors (20-29)
    #[error("session table ingest failed: {0}")]
    Ingest(String),

    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    #[error("CSV parse error at record {record}: {message}")]
    CsvRecord { record: u64, message: String },

    // Detection errors (30-39)
    #[error("join detection failed on table {table_id}: {reason}")]
    Detection { table_id: String, reason: String },

    // Aggregation errors (40-49)
    #[error("profile aggregation failed for user {username}: {reason}")]
    Aggregation { username: String, reason: String },

    // Report errors (50-59)
    #[error("report generation failed: {0}")]
    Report(String),

    #[error("payload encoding failed: {0}")]
    PayloadEncoding(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Error codes are grouped by pipeline stage:
    /// - 10-19: Configuration errors
    /// - 20-29: Ingest errors
    /// - 30-39: Detection errors
    /// - 40-49: Aggregation errors
    /// - 50-59: Report errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidThreshold { .. } => 11,
            Error::InvalidSettings(_) => 12,
            Error::Ingest(_) => 20,
            Error::InputNotFound { .. } => 21,
            Error::MissingColumn { .. } => 22,
            Error::CsvRecord { .. } => 23,
            Error::Detection { .. } => 30,
            Error::Aggregation { .. } => 40,
            Error::Report(_) => 50,
            Error::PayloadEncoding(_) => 51,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the pipeline stage this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidThreshold { .. } | Error::InvalidSettings(_) => {
                ErrorCategory::Config
            }

            Error::Ingest(_)
            | Error::InputNotFound { .. }
            | Error::MissingColumn { .. }
            | Error::CsvRecord { .. } => ErrorCategory::Ingest,

            Error::Detection { .. } => ErrorCategory::Detection,

            Error::Aggregation { .. } => ErrorCategory::Aggregation,

            Error::Report(_) | Error::PayloadEncoding(_) => ErrorCategory::Report,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable by the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidThreshold { .. } => true,
            Error::InvalidSettings(_) => true,

            Error::Ingest(_) => true,
            Error::InputNotFound { .. } => true,
            Error::MissingColumn { .. } => true,
            Error::CsvRecord { .. } => true,

            // Pure computation; a failure here is a bug, not user error.
            Error::Detection { .. } => false,
            Error::Aggregation { .. } => false,

            Error::Report(_) => true,
            Error::PayloadEncoding(_) => false,

            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidThreshold { .. } => "Invalid Threshold",
            Error::InvalidSettings(_) => "Invalid Settings File",

            Error::Ingest(_) => "Session Table Ingest Error",
            Error::InputNotFound { .. } => "Input File Not Found",
            Error::MissingColumn { .. } => "Missing Required Column",
            Error::CsvRecord { .. } => "CSV Parse Error",

            Error::Detection { .. } => "Join Detection Error",
            Error::Aggregation { .. } => "Profile Aggregation Error",

            Error::Report(_) => "Report Generation Error",
            Error::PayloadEncoding(_) => "Payload Encoding Error",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'bh check' to validate settings, or check syntax in the settings file."
            }
            Error::InvalidThreshold { .. } => {
                "Pass a finite number of seconds to --threshold (the default is 15)."
            }
            Error::InvalidSettings(_) => {
                "Fix the JSON syntax in the settings file, or delete it to use builtin defaults."
            }

            Error::Ingest(_) => {
                "Check that the input file is a headered CSV export of table sessions."
            }
            Error::InputNotFound { .. } => {
                "Check the --input path. Relative paths resolve from the current directory."
            }
            Error::MissingColumn { .. } => {
                "The CSV header must include at least tableId, username, and startSession."
            }
            Error::CsvRecord { .. } => {
                "Check the named record for unbalanced quotes or a wrong field count."
            }

            Error::Detection { .. } => {
                "This indicates a bug in the detector. Please report it with the input file."
            }
            Error::Aggregation { .. } => {
                "This indicates a bug in the profiler. Please report it with the input file."
            }

            Error::Report(_) => {
                "Check that the output directory is writable and has free space."
            }
            Error::PayloadEncoding(_) => {
                "The analysis payload could not be compressed. Please report this as a bug."
            }

            Error::Io(_) => {
                "Check disk space, permissions, and that the output directory exists."
            }
            Error::Json(_) => {
                "The dataset could not be serialized. Please report this as a bug."
            }
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Failing pipeline stage.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g. table id, row number).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidThreshold { value } => {
                context.insert("threshold".to_string(), serde_json::json!(value));
            }
            Error::InputNotFound { path } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            Error::MissingColumn { column } => {
                context.insert("column".to_string(), serde_json::json!(column));
            }
            Error::CsvRecord { record, .. } => {
                context.insert("record".to_string(), serde_json::json!(record));
            }
            Error::Detection { table_id, .. } => {
                context.insert("table_id".to_string(), serde_json::json!(table_id));
            }
            Error::Aggregation { username, .. } => {
                context.insert("username".to_string(), serde_json::json!(username));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
