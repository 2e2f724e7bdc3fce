//! Neon Games - terminal tic-tac-toe with AI move hints.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use neon_advisor::{AdvisorConfig, HintAdvisor, decode_board};
use neon_games::run_console;
use neon_tictactoe::{Mark, Phase};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,neon_games=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, offline } => run_play(&config, offline).await,
        Command::Hint {
            board,
            mark,
            config,
        } => run_hint(&board, mark, &config).await,
    }
}

/// Loads the advisor config, falling back to defaults when the file is absent.
#[instrument]
fn load_config(path: &Path) -> Result<AdvisorConfig> {
    if !path.exists() {
        info!(path = %path.display(), "No advisor config file, using defaults");
        return Ok(AdvisorConfig::default());
    }
    let config = AdvisorConfig::from_file(path)
        .with_context(|| format!("Failed to load advisor config from {}", path.display()))?;
    info!(provider = %config.provider(), model = config.model(), "Loaded advisor config");
    Ok(config)
}

/// Run the interactive two-player game
#[instrument]
async fn run_play(config: &Path, offline: bool) -> Result<()> {
    let advisor = if offline {
        info!("Advisor disabled by --offline");
        HintAdvisor::offline()
    } else {
        HintAdvisor::from_config(&load_config(config)?)
    };

    run_console(advisor).await
}

/// Request one hint for a board and print it as JSON
#[instrument]
async fn run_hint(board: &str, mark: Mark, config: &Path) -> Result<()> {
    let board = decode_board(board).context("Invalid --board")?;
    if let phase @ (Phase::Won(_) | Phase::Drawn) = Phase::of(&board) {
        bail!("Board is already decided ({}), nothing to advise", phase);
    }

    let advisor = HintAdvisor::from_config(&load_config(config)?);
    let outcome = advisor.request_hint(&board, mark).await;
    if let Some(cause) = outcome.cause() {
        info!(error = %cause, "Advisor failed, printing fallback");
    }

    println!("{}", serde_json::to_string_pretty(outcome.suggestion())?);
    Ok(())
}
