// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use mdtidy::app_config::{self, Config, parse_threshold};
use mdtidy::cleanup::{DEFAULT_HEADER_THRESHOLD, DEFAULT_SENTENCE_THRESHOLD, TransformKind};
use mdtidy::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Markdown file or directory to process (directories are walked recursively)
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove near-duplicate sentences; fenced code and structural lines are kept
    DedupSentences {
        #[command(flatten)]
        target: TargetArgs,

        /// Similarity threshold between 0.0 and 1.0 (invalid values fall back to 0.8)
        #[arg(short, long)]
        threshold: Option<String>,
    },

    /// Remove headers that repeat an earlier header
    DedupHeaders {
        #[command(flatten)]
        target: TargetArgs,

        /// Similarity threshold between 0.0 and 1.0 (invalid values fall back to 0.85)
        #[arg(short, long)]
        threshold: Option<String>,
    },

    /// Collapse consecutive identical fence marker lines
    DedupFences(TargetArgs),

    /// Replace ```dot fences with ```graphviz
    RetagDot(TargetArgs),

    /// Replace LaTeX \[ and \] display math brackets with $$
    FixMath(TargetArgs),

    /// Fix common Mermaid syntax errors without any external service
    FixMermaid(TargetArgs),

    /// Generate shell completions for mdtidy
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// mdtidy - Markdown cleanup toolkit
///
/// Applies one idempotent cleanup to a Markdown file or to every Markdown
/// file below a directory.
#[derive(Parser, Debug)]
#[command(name = "mdtidy")]
#[command(version)]
#[command(about = "Bulk cleanup for Markdown documents")]
#[command(long_about = "mdtidy walks a file or directory and applies one cleanup to every Markdown document.

EXAMPLES:
    mdtidy dedup-sentences notes/                # Remove near-duplicate sentences (threshold 0.8)
    mdtidy dedup-sentences -t 0.9 notes/         # Only remove very close duplicates
    mdtidy -n dedup-headers notes/               # Show which headers would be removed
    mdtidy dedup-fences notes/                   # Collapse doubled ``` lines
    mdtidy retag-dot docs/                       # ```dot -> ```graphviz
    mdtidy fix-math docs/                        # \\[ \\] -> $$
    mdtidy fix-mermaid docs/                     # Offline Mermaid syntax fixes
    mdtidy completions bash > mdtidy.bash        # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default (or from the per-user
    config directory). If no config file exists, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Maximum number of files processed at the same time
    #[arg(short, long, global = true)]
    jobs: Option<usize>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger; the facade's max level does the filtering afterwards
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color sequence for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let (kind, target, threshold) = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mdtidy", &mut std::io::stdout());
            return Ok(());
        }
        Commands::DedupSentences { target, threshold } => (TransformKind::DedupSentences, target, threshold),
        Commands::DedupHeaders { target, threshold } => (TransformKind::DedupHeaders, target, threshold),
        Commands::DedupFences(target) => (TransformKind::DedupFences, target, None),
        Commands::RetagDot(target) => (TransformKind::RetagDot, target, None),
        Commands::FixMath(target) => (TransformKind::FixMath, target, None),
        Commands::FixMermaid(target) => (TransformKind::FixMermaid, target, None),
    };

    let config_path = Config::locate(cli.config_path.as_deref());
    debug!("Using configuration file {}", config_path.display());
    let mut config = Config::load_or_create(&config_path)?;

    // Override config with CLI options if provided
    if let Some(raw) = &threshold {
        match kind {
            TransformKind::DedupSentences => {
                config.sentence_threshold = parse_threshold(raw, DEFAULT_SENTENCE_THRESHOLD);
            }
            TransformKind::DedupHeaders => {
                config.header_threshold = parse_threshold(raw, DEFAULT_HEADER_THRESHOLD);
            }
            _ => {}
        }
    }

    if let Some(jobs) = cli.jobs {
        config.concurrent_files = jobs;
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.into());
    }

    let controller = Controller::with_config(config)?.with_dry_run(cli.dry_run);
    controller.run(kind, &target.path).await?;

    Ok(())
}
