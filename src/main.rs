//! Hammurabi - Entry Point
//!
//! Loads the session config, sets up logging, and plays one reign on the
//! terminal.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hammurabi::core::config::SessionConfig;
use hammurabi::simulation::ChaChaRandom;
use hammurabi::ui::{Session, SessionEnd};

/// Rule the city of Sumeria for ten years
#[derive(Parser, Debug)]
#[command(name = "hammurabi")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file path (overrides the config)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Random seed for a reproducible reign (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "hammurabi=debug" (overrides the config)
    #[arg(long)]
    log: Option<String>,

    /// Start a new reign even if a saved game exists
    #[arg(long)]
    new: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .init();

    tracing::info!(save = %config.save_path.display(), seed = ?config.seed, "Hammurabi starting");

    let rng = match config.seed {
        Some(seed) => ChaChaRandom::seed_from_u64(seed),
        None => ChaChaRandom::from_entropy(),
    };

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), rng, config.save_path)
        .ignore_saved_game(args.new);

    match session.run() {
        Ok(end) => {
            match end {
                SessionEnd::Finished(score) => {
                    tracing::info!(verdict = ?score.verdict, "Reign finished")
                }
                SessionEnd::Saved => tracing::info!("Game saved, exiting"),
                SessionEnd::Aborted => tracing::info!("Input closed, exiting"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Session failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<SessionConfig, hammurabi::core::ConfigError> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load_from_toml(path)?,
        None => SessionConfig::new(),
    };
    if let Some(save) = &args.save {
        config.save_path = save.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(filter) = &args.log {
        config.log_filter = filter.clone();
    }
    config.validate()?;
    Ok(config)
}
