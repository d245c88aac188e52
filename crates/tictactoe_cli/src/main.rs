//! tictactoe - two players, one terminal.

use anyhow::Result;
use clap::Parser;
use std::io;
use tictactoe_cli::{Cli, Driver, GameConfig};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    }
    .with_overrides(&cli);
    debug!(?config, "Effective configuration");

    let game = config.new_game();
    let mut driver = Driver::new(game, io::stdin().lock(), io::stdout().lock());
    let status = driver.run()?;

    info!(%status, "Exiting");
    Ok(())
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
