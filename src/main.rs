use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use focuslog::cli::args::{Cli, Commands, TuiArgs};
use focuslog::cli::commands;
use focuslog::config::{Config, Paths};
use focuslog::error::FocuslogError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), FocuslogError> {
    let cli = Cli::parse();
    let format = cli.output;

    let mut paths = Paths::default();
    if let Some(config_file) = &cli.config {
        paths = paths.with_config_file(config_file);
    }

    let command = cli.command.unwrap_or_else(|| Commands::Tui(TuiArgs::default()));
    init_tracing(cli.verbose, matches!(command, Commands::Tui(_)), &paths)?;

    let output = match command {
        Commands::Tui(args) => {
            let config = Config::load_from_path(&paths.config_file)?;
            tracing::debug!(?config, "loaded configuration");
            commands::tui(&paths, &config, &args, format)?
        }
        Commands::Config(args) => commands::config(&paths, args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Set up tracing. The terminal UI owns the screen, so its traces go to a file.
///
/// Returns whether this call installed the global subscriber.
fn init_tracing(verbose: bool, tui: bool, paths: &Paths) -> Result<bool, FocuslogError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("FOCUSLOG_LOG").unwrap_or_else(|_| {
            EnvFilter::new(if tui { "info" } else { "warn" })
        })
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if tui {
        paths.ensure_dirs()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_file)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    // A subscriber installed earlier keeps receiving events.
    if let Err(e) = &installed {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
    Ok(installed.is_ok())
}
