//! Command-line interface for the tictactoe binary.

use clap::Parser;
use std::path::PathBuf;
use tictactoe::Player;

/// Two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Player who moves first (x or o). Picked at random when unset.
    #[arg(long)]
    pub first: Option<Player>,

    /// Seed for the random pick of the first player
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
