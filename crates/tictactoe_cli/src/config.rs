//! Game configuration from a TOML file and command-line overrides.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe::{GameState, Player};
use tracing::{debug, info, instrument};

/// How a new game is set up.
///
/// ```toml
/// first_player = "o"   # optional, random when absent
/// seed = 42            # optional, seeds the random pick
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Player who moves first.
    #[serde(default)]
    first_player: Option<Player>,

    /// Seed for picking the first player.
    #[serde(default)]
    seed: Option<u64>,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies command-line flags on top of this configuration.
    #[instrument(skip(self, cli))]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(first) = cli.first {
            self.first_player = Some(first);
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        self
    }

    /// Starts a game as configured.
    ///
    /// An explicit first player wins over a seed; with neither the pick is
    /// random.
    #[instrument(skip(self))]
    pub fn new_game(&self) -> GameState {
        match (self.first_player, self.seed) {
            (Some(first), _) => GameState::starting_with(first),
            (None, Some(seed)) => GameState::with_rng(&mut StdRng::seed_from_u64(seed)),
            (None, None) => GameState::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
