//! Command-line interface for neon_games.

use clap::{Parser, Subcommand};
use neon_tictactoe::Mark;

/// Neon Tic-Tac-Toe - two players, one terminal, optional AI hints
#[derive(Parser, Debug)]
#[command(name = "neon_games")]
#[command(about = "Two-player tic-tac-toe with AI move hints", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Path to advisor config (TOML). Defaults apply when absent.
        #[arg(short, long, default_value = "neon_advisor.toml")]
        config: std::path::PathBuf,

        /// Disable the advisor; every hint falls back
        #[arg(long)]
        offline: bool,
    },

    /// Ask for a single hint and print it as JSON
    Hint {
        /// Board as nine comma-separated tokens, e.g. "X,1,2,3,O,5,6,7,8"
        #[arg(short, long)]
        board: String,

        /// Mark to advise (X or O)
        #[arg(short, long, default_value = "X", value_parser = parse_mark)]
        mark: Mark,

        /// Path to advisor config (TOML). Defaults apply when absent.
        #[arg(short, long, default_value = "neon_advisor.toml")]
        config: std::path::PathBuf,
    },
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    Mark::from_token(s).ok_or_else(|| format!("Invalid mark '{}', expected X or O", s))
}
