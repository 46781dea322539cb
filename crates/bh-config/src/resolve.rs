//! Settings file resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path →
//! system path → builtin defaults.

use std::path::{Path, PathBuf};

/// Discovered settings file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to settings.json (or None for builtin defaults).
    pub settings: Option<PathBuf>,

    /// Source of the settings file (for diagnostics).
    pub source: ConfigSource,
}

/// Where the settings file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/bumphunter/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
const ENV_SETTINGS_PATH: &str = "BUMPHUNTER_CONFIG";
const ENV_CONFIG_DIR: &str = "BUMPHUNTER_CONFIG_DIR";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "bumphunter";

/// Resolve the settings file path using the standard resolution order.
///
/// Resolution order:
/// 1. Explicit CLI path (if provided)
/// 2. BUMPHUNTER_CONFIG environment variable (direct path)
/// 3. BUMPHUNTER_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/bumphunter/)
/// 5. System config (/etc/bumphunter/)
/// 6. Built-in defaults (None)
pub fn resolve_settings(cli_path: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();

    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            paths.source = ConfigSource::CliArgument;
            paths.settings = Some(path.to_path_buf());
            return paths;
        }
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            paths.source = ConfigSource::Environment;
            paths.settings = Some(path);
            return paths;
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            paths.source = ConfigSource::Environment;
            paths.settings = Some(path);
            return paths;
        }
    }

    // 4. XDG config directory
    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(SETTINGS_FILENAME);
        if path.exists() {
            paths.source = ConfigSource::XdgConfig;
            paths.settings = Some(path);
            return paths;
        }
    }

    // 5. System config
    let system_path = PathBuf::from("/etc").join(APP_NAME).join(SETTINGS_FILENAME);
    if system_path.exists() {
        paths.source = ConfigSource::SystemConfig;
        paths.settings = Some(system_path);
        return paths;
    }

    // 6. Built-in default (None)
    paths
}

/// Get the XDG config directory for bumphunter.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_cli_argument_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{{}}").unwrap();

        let paths = resolve_settings(Some(&path));
        assert_eq!(paths.source, ConfigSource::CliArgument);
        assert_eq!(paths.settings.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_cli_path_falls_through() {
        let paths = resolve_settings(Some(Path::new("/nonexistent/settings.json")));
        // With no env vars or config dirs set up, this lands on defaults.
        assert_ne!(paths.source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_xdg_config_dir_suffix() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
