//! Bumphunter settings loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the settings file
//! - Settings resolution (CLI → env → XDG → /etc → defaults)
//! - Semantic validation with errors and warnings

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_settings, ConfigPaths, ConfigSource};
pub use settings::{ReportSettings, Settings, DEFAULT_THRESHOLD_SECS};
pub use validate::{validate_settings, ValidationError, ValidationOutcome, ValidationResult};

/// Schema version for the settings file.
pub const SETTINGS_SCHEMA_VERSION: &str = "1.0.0";
