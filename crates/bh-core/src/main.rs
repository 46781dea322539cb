//! Bumphunter CLI - table-session bump-hunting analysis
//!
//! The main entry point for bh, handling:
//! - Session table ingest from CSV exports
//! - Suspicious-join detection and profile scoring
//! - Self-contained HTML report generation (or raw JSON output)
//! - Settings resolution and validation

use bh_common::{format_error_human, Error, OutputFormat};
use bh_config::{resolve_settings, validate_settings, Settings};
use bh_core::exit_codes::ExitCode;
use bh_core::logging::{init_logging, LogConfig, LogFormat};
use bh_core::pipeline::analyze_file;
use bh_report::{ReportConfig, ReportGenerator, ReportTheme};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bumphunter - detect players repeatedly joining right after an opponent
#[derive(Parser)]
#[command(name = "bh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to the settings file
    #[arg(long, global = true, env = "BUMPHUNTER_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human, env = "BH_LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: load CSV, detect joins, score, write report
    Analyze(AnalyzeArgs),

    /// Validate settings and optionally the input file
    Check(CheckArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Input CSV file of table sessions
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path (defaults to the settings output dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum adjacency gap in seconds considered suspicious
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Report theme
    #[arg(long, value_parser = ["light", "dark", "auto"])]
    theme: Option<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Also verify that this input file loads
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_flags(
        cli.global.verbose,
        cli.global.quiet,
        cli.global.log_format,
        cli.global.no_color,
    );
    init_logging(&log_config);

    let run_id = bh_core::logging::generate_run_id();
    info!(run_id = %run_id, "bh starting");

    let use_color = !cli.global.no_color && std::io::stderr().is_terminal();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format_error_human(&err, use_color));
            ExitCode::from(&err)
        }
    };

    std::process::exit(code.as_i32());
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    match &cli.command {
        Commands::Analyze(args) => analyze(cli, args),
        Commands::Check(args) => check(cli, args),
        Commands::Version => {
            println!(
                "bh {} (payload schema {})",
                env!("CARGO_PKG_VERSION"),
                bh_common::SCHEMA_VERSION
            );
            Ok(ExitCode::Clean)
        }
    }
}

/// Load settings from the resolved file and apply CLI overrides.
fn load_settings(cli: &Cli) -> Result<Settings, Error> {
    let paths = resolve_settings(cli.global.config.as_deref());
    let mut settings = match &paths.settings {
        Some(path) => {
            info!(path = %path.display(), source = %paths.source, "settings loaded");
            Settings::load(path).map_err(|e| Error::InvalidSettings(e.to_string()))?
        }
        None => Settings::default(),
    };

    // A config path given explicitly must exist; silently falling back to
    // defaults would mask typos.
    if let Some(requested) = &cli.global.config {
        if paths.settings.as_deref() != Some(requested.as_path()) && !requested.exists() {
            return Err(Error::Config(format!(
                "settings file not found: {}",
                requested.display()
            )));
        }
    }

    if let Commands::Analyze(args) = &cli.command {
        if let Some(threshold) = args.threshold {
            settings.threshold_secs = threshold;
        }
        if let Some(title) = &args.title {
            settings.report.title = Some(title.clone());
        }
        if let Some(theme) = &args.theme {
            settings.report.theme = Some(theme.clone());
        }
    }

    Ok(settings)
}

/// Validate settings, treating validation errors as config errors.
fn validated_settings(cli: &Cli) -> Result<Settings, Error> {
    let settings = load_settings(cli)?;
    let outcome = validate_settings(&settings);

    for warning in &outcome.warnings {
        warn!("{warning}");
    }
    if let Some(first) = outcome.errors.first() {
        return Err(Error::Config(first.to_string()));
    }

    Ok(settings)
}

fn analyze(cli: &Cli, args: &AnalyzeArgs) -> Result<ExitCode, Error> {
    let settings = validated_settings(cli)?;

    let input = args
        .input
        .clone()
        .or_else(|| settings.input.clone())
        .ok_or_else(|| Error::Config("no input file given (use --input)".to_string()))?;

    let dataset = analyze_file(&input, settings.threshold_secs)?;

    let output = args.output.clone().unwrap_or_else(|| {
        let mut path = settings.report_path();
        path.set_extension(args.format.extension());
        path
    });
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match args.format {
        OutputFormat::Html => {
            let mut report_config = ReportConfig::default();
            if let Some(title) = &settings.report.title {
                report_config = report_config.with_title(title.clone());
            }
            if let Some(theme) = &settings.report.theme {
                report_config = report_config.with_theme(ReportTheme::from_name(theme));
            }

            let html = ReportGenerator::new(report_config)
                .generate(&dataset)
                .map_err(|e| Error::Report(e.to_string()))?;
            std::fs::write(&output, html)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&dataset)?;
            std::fs::write(&output, json)?;
        }
    }

    info!(output = %output.display(), "output written");
    println!("{}", output.display());

    Ok(ExitCode::Clean)
}

fn check(cli: &Cli, args: &CheckArgs) -> Result<ExitCode, Error> {
    let settings = load_settings(cli)?;
    let outcome = validate_settings(&settings);

    for warning in &outcome.warnings {
        println!("warning: {warning}");
    }
    if !outcome.is_valid() {
        for error in &outcome.errors {
            println!("error: {error}");
        }
        return Ok(ExitCode::ConfigError);
    }
    println!("settings ok (threshold {}s)", settings.threshold_secs);

    let input = args.input.as_deref().or(settings.input.as_deref());
    if let Some(input) = input {
        let sessions = load_input_summary(input)?;
        println!("input ok ({sessions} sessions)");
    }

    Ok(ExitCode::Clean)
}

fn load_input_summary(input: &Path) -> Result<usize, Error> {
    let sessions = bh_core::loader::load_sessions(input)?;
    Ok(sessions.len())
}
