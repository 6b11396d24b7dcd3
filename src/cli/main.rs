//! Command-line interface entry point for `cgpa`

mod args;
mod commands;

use args::{Cli, Command};
use cgpa_calculator::config::Config;
use clap::Parser;
use logger::{
    debug, enable_debug, enable_verbose, error, info, init_file_logging, set_level, warn, Level,
};
use std::path::{Path, PathBuf};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    let mut file_logging = false;
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        create_log_dir(log_path);
        let display_path = log_path.to_string_lossy();
        file_logging = init_file_logging(log_path);
        if file_logging {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    debug!("cgpa v{} starting", cgpa_calculator::get_version());

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Catalog { tier } => commands::catalog::run_catalog(tier, &config),
        Command::Scale => commands::catalog::run_scale(&config),
        Command::Scratch { input } => commands::calculate::scratch(&input, &config),
        Command::Term {
            input,
            prior_cgpa,
            prior_credits,
        } => commands::calculate::term(&input, prior_cgpa, prior_credits, &config),
    };

    if let Err(message) = result {
        // Console output is the user-facing copy; the log file gets its own
        if file_logging {
            error!("{message}");
        }
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Create the directory a log file lives in. Failures are reported and
/// left for `init_file_logging` to trip over.
fn create_log_dir(log_path: &Path) -> bool {
    let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to create log directory {}: {e}", parent.display());
            false
        }
    }
}
