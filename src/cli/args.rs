//! CLI argument definitions for `cgpa`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cgpa_calculator::config::ConfigOverrides;
use cgpa_calculator::core::models::Tier;
use logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `scale`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Where grades come from and where results go
#[derive(Debug, Args)]
pub struct GradeInput {
    /// Academic level: foundational, diploma, or degree (defaults to the sheet's `level`)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<Tier>,

    /// Grade sheet TOML file (`level` plus a `[grades]` table of NAME = "GRADE")
    #[arg(long, value_name = "FILE")]
    pub grades: Option<PathBuf>,

    /// Grade for one course or project as NAME=GRADE (repeatable; overrides the sheet)
    #[arg(short = 'g', long = "grade", value_name = "NAME=GRADE")]
    pub grade: Vec<String>,

    /// Also write a report: markdown (md) or html
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<String>,

    /// Report output path (format inferred from the extension when --report is omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List catalog courses and projects with their credits.
    Catalog {
        /// Only list this tier
        #[arg(short, long, value_name = "LEVEL")]
        tier: Option<Tier>,
    },
    /// Show the active grade-to-points table.
    Scale,
    /// Compute a cumulative CGPA from scratch.
    ///
    /// Every course and project below LEVEL must be graded; graded items at
    /// LEVEL are included.
    Scratch {
        #[command(flatten)]
        input: GradeInput,
    },
    /// Compute the current term's CGPA and merge it into a prior CGPA.
    ///
    /// Only graded items at LEVEL count toward the term.
    Term {
        #[command(flatten)]
        input: GradeInput,

        /// Previously reported CGPA (0 to 10)
        #[arg(long, value_name = "CGPA")]
        prior_cgpa: f64,

        /// Credits the previous CGPA covers
        #[arg(long, value_name = "CREDITS")]
        prior_credits: u32,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "cgpa",
    about = "Credit-weighted CGPA calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Grade table preset for this run: e4 (E = 4 points) or e5 (E = 5 points)
    #[arg(long, value_name = "PRESET")]
    pub scale: Option<String>,

    /// Custom grade table TOML for this run
    #[arg(long = "scale-file", value_name = "PATH")]
    pub scale_file: Option<PathBuf>,

    /// Catalog TOML for this run
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// The overrides apply to this run only and are never saved.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            scale: self.scale.clone(),
            scale_file: self.scale_file.as_ref().map(path_string),
            catalog_file: self.catalog.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
        }
    }
}
