//! Structured logging foundation for bh-core.
//!
//! Dual-mode logging on stderr:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scripted workflows
//!
//! stdout stays reserved for command payloads (JSON output mode). Level
//! selection honors BH_LOG and RUST_LOG; `-v`/`-q` flags override both.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable console format.
    #[default]
    Human,
    /// Machine-parseable JSON lines.
    Jsonl,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Logging configuration assembled from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Default level directive when no env filter is set.
    pub level: &'static str,
    /// Force-disable ANSI colors.
    pub no_color: bool,
}

impl LogConfig {
    /// Build a config from verbosity flags.
    ///
    /// `verbose` counts `-v` occurrences; `quiet` wins over verbose.
    pub fn from_flags(verbose: u8, quiet: bool, format: LogFormat, no_color: bool) -> Self {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        };
        Self {
            format,
            level,
            no_color,
        }
    }
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. Respects
/// BH_LOG and RUST_LOG when set; otherwise uses the level from flags.
pub fn init_logging(config: &LogConfig) {
    let filter = std::env::var("BH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(config.level));

    match config.format {
        LogFormat::Human => {
            let use_ansi = !config.no_color && std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are plenty for log correlation.
    format!("run-{}", &uuid.simple().to_string()[..12])
}
