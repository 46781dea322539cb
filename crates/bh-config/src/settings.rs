//! Typed settings for a bumphunter run.
//!
//! The settings file is JSON. Every field has a default, so a missing or
//! partial file is never an error; the CLI layers its flags on top of
//! whatever resolves here.

use crate::validate::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum start-time gap, in seconds, considered suspicious.
pub const DEFAULT_THRESHOLD_SECS: f64 = 15.0;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD_SECS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_report_filename() -> String {
    "bumphunter_report.html".to_string()
}

fn default_schema_version() -> String {
    crate::SETTINGS_SCHEMA_VERSION.to_string()
}

/// Report presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Custom report title; the generator picks a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Color theme: "light", "dark", or "auto".
    #[serde(default)]
    pub theme: Option<String>,
}

/// Complete settings for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Settings schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Maximum adjacency gap in seconds considered suspicious.
    ///
    /// Values ≤ 0 are valid and yield joins only for exact-simultaneous
    /// starts.
    #[serde(default = "default_threshold")]
    pub threshold_secs: f64,

    /// Default input CSV path, overridable by --input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Directory the report is written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the generated report.
    #[serde(default = "default_report_filename")]
    pub report_filename: String,

    /// Report presentation settings.
    #[serde(default)]
    pub report: ReportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            threshold_secs: DEFAULT_THRESHOLD_SECS,
            input: None,
            output_dir: default_output_dir(),
            report_filename: default_report_filename(),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> ValidationResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw).map_err(|e| ValidationError::ParseError(e.to_string()))
    }

    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Full path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_filename)
    }

    /// Override the threshold.
    pub fn with_threshold(mut self, secs: f64) -> Self {
        self.threshold_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.threshold_secs, 15.0);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.report_filename, "bumphunter_report.html");
        assert!(settings.input.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::from_json(r#"{"threshold_secs": 30}"#).unwrap();
        assert_eq!(settings.threshold_secs, 30.0);
        assert_eq!(settings.report_filename, "bumphunter_report.html");
        assert_eq!(settings.schema_version, crate::SETTINGS_SCHEMA_VERSION);
    }

    #[test]
    fn test_report_path_joins_dir_and_filename() {
        let settings = Settings::default();
        assert_eq!(
            settings.report_path(),
            PathBuf::from("output/bumphunter_report.html")
        );
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default().with_threshold(7.5);
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
