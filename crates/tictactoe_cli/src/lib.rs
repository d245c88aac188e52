//! Terminal front end for two-player tic-tac-toe.
//!
//! - **Cli**: command-line flags
//! - **Config**: optional TOML file, overridden by flags
//! - **Driver**: the blocking prompt/parse/play loop over any `BufRead`/`Write`

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod driver;

pub use cli::Cli;
pub use config::{ConfigError, GameConfig};
pub use driver::{Driver, INVALID_CELL, INVALID_INPUT, PROMPT, read_move};
