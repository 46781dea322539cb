//! Settings validation errors and semantic validation.

use crate::settings::Settings;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 62,
            ValidationError::InvalidValue { .. } => 63,
            ValidationError::VersionMismatch { .. } => 64,
        }
    }
}

/// Outcome of semantic validation: fatal errors plus advisory warnings.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Fatal problems; the run must not proceed.
    pub errors: Vec<ValidationError>,
    /// Advisory findings; the run may proceed.
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// True when no fatal errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate settings semantically.
///
/// A threshold of zero or below is deliberately NOT an error: it is a
/// valid configuration that flags only exact-simultaneous starts. It gets
/// a warning because it is rarely what the operator intended.
pub fn validate_settings(settings: &Settings) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if settings.schema_version != crate::SETTINGS_SCHEMA_VERSION {
        outcome.errors.push(ValidationError::VersionMismatch {
            expected: crate::SETTINGS_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    if !settings.threshold_secs.is_finite() {
        outcome.errors.push(ValidationError::InvalidValue {
            field: "threshold_secs".to_string(),
            message: format!("must be a finite number, got {}", settings.threshold_secs),
        });
    } else if settings.threshold_secs <= 0.0 {
        outcome.warnings.push(format!(
            "threshold_secs = {} flags only exact-simultaneous joins",
            settings.threshold_secs
        ));
    }

    if settings.report_filename.is_empty() {
        outcome.errors.push(ValidationError::InvalidValue {
            field: "report_filename".to_string(),
            message: "must not be empty".to_string(),
        });
    } else if settings.report_filename.contains(std::path::MAIN_SEPARATOR) {
        outcome.errors.push(ValidationError::InvalidValue {
            field: "report_filename".to_string(),
            message: "must be a bare file name; use output_dir for the directory".to_string(),
        });
    }

    if let Some(theme) = settings.report.theme.as_deref() {
        if !matches!(theme, "light" | "dark" | "auto") {
            outcome.errors.push(ValidationError::InvalidValue {
                field: "report.theme".to_string(),
                message: format!("must be one of light/dark/auto, got {theme:?}"),
            });
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_clean() {
        let outcome = validate_settings(&Settings::default());
        assert!(outcome.is_valid());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_nan_threshold_is_fatal() {
        let settings = Settings::default().with_threshold(f64::NAN);
        let outcome = validate_settings(&settings);
        assert!(!outcome.is_valid());
        assert!(matches!(
            outcome.errors[0],
            ValidationError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_non_positive_threshold_warns_but_passes() {
        let settings = Settings::default().with_threshold(0.0);
        let outcome = validate_settings(&settings);
        assert!(outcome.is_valid());
        assert_eq!(outcome.warnings.len(), 1);

        let settings = Settings::default().with_threshold(-3.0);
        assert!(validate_settings(&settings).is_valid());
    }

    #[test]
    fn test_bad_theme_rejected() {
        let mut settings = Settings::default();
        settings.report.theme = Some("solarized".to_string());
        assert!(!validate_settings(&settings).is_valid());
    }

    #[test]
    fn test_report_filename_with_separator_rejected() {
        let mut settings = Settings::default();
        settings.report_filename = "nested/report.html".to_string();
        assert!(!validate_settings(&settings).is_valid());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut settings = Settings::default();
        settings.schema_version = "9.9.9".to_string();
        let outcome = validate_settings(&settings);
        assert!(!outcome.is_valid());
        assert!(matches!(
            outcome.errors[0],
            ValidationError::VersionMismatch { .. }
        ));
    }
}
