//! Report configuration types.

use serde::{Deserialize, Serialize};

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Auto-detect from system preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }

    /// Parse from a settings string; unknown values fall back to auto.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => ReportTheme::Light,
            "dark" => ReportTheme::Dark,
            _ => ReportTheme::Auto,
        }
    }
}

/// CDN library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnLibrary {
    /// npm package name.
    pub package: String,
    /// Pinned version number.
    pub version: String,
    /// Subresource integrity hash (SHA-512).
    pub sri: String,
    /// Path within the npm package.
    pub path: String,
}

impl CdnLibrary {
    /// Get the full CDN URL for this library.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}@{}/{}", base_url, self.package, self.version, self.path)
    }
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_string()
}

/// pako, pinned. The report payload is inflated in the browser, so this
/// is the one external asset the document needs.
fn default_pako() -> CdnLibrary {
    CdnLibrary {
        package: "pako".to_string(),
        version: "2.1.0".to_string(),
        sri: "sha512-g2TeAWw5GPnX7z0Kn8nFbYfWzTLlwJMMiQbFBS0ZWW4M2X80wGJtJYpdCrdZcQ/2DCipooe4F7LyXp2KUYRKoQ==".to_string(),
        path: "dist/pako.min.js".to_string(),
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Custom report title.
    pub title: Option<String>,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Base URL for CDN resources.
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,
    /// The pako inflate library.
    #[serde(default = "default_pako")]
    pub pako: CdnLibrary,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            theme: ReportTheme::default(),
            cdn_base: default_cdn_base(),
            pako: default_pako(),
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Effective report title.
    pub fn resolved_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Bumphunter Report")
    }
}
