//! Tic-tac-toe game logic.
//!
//! A 3x3 board, two players (`x` and `o`), strict turn alternation and
//! win/draw detection. Everything here is pure state; reading input and
//! printing the board belong to the caller.
//!
//! # Example
//!
//! ```
//! use tictactoe::{GameState, GameStatus, Player};
//!
//! let mut game = GameState::starting_with(Player::X);
//! for cell in [1, 4, 2, 5] {
//!     assert_eq!(game.play(cell)?, GameStatus::InProgress);
//! }
//! assert_eq!(game.play(3)?, GameStatus::Won(Player::X));
//! assert!(game.play(6).is_err());
//! # Ok::<(), tictactoe::InvalidMove>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod cell;
mod game;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{InvalidMove, InvalidMoveKind, Move};
pub use cell::Cell;
pub use game::GameState;
pub use types::{Board, GameStatus, Player, Square};
