//! Moves and the error raised when one cannot be made.

use super::{Cell, Player};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a player placing their mark on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell where the player places their mark.
    pub cell: Cell,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, cell: Cell) -> Self {
        Self { player, cell }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the cell of this move.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell)
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvalidMoveKind {
    /// The cell number is outside 1-9.
    #[display("cell {} is not between 1 and 9", _0)]
    OutOfRange(i64),

    /// The cell already holds a marker.
    #[display("cell {} is already occupied", _0)]
    Occupied(Cell),

    /// Input could not be read as a cell number.
    #[display("{:?} is not a number", _0)]
    NotANumber(String),

    /// The game has already been won or drawn.
    #[display("the game is already over")]
    GameOver,
}

/// A rejected move, with the location that rejected it.
///
/// Never fatal: the caller reports it and asks again.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid move: {} at {}:{}", kind, file, line)]
pub struct InvalidMove {
    /// Why the move was rejected.
    pub kind: InvalidMoveKind,
    /// Line number where the move was rejected.
    pub line: u32,
    /// Source file where the move was rejected.
    pub file: &'static str,
}

impl InvalidMove {
    /// Creates a new invalid move error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: InvalidMoveKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Cell number outside 1-9.
    #[track_caller]
    pub fn out_of_range(number: i64) -> Self {
        Self::new(InvalidMoveKind::OutOfRange(number))
    }

    /// Cell already taken.
    #[track_caller]
    pub fn occupied(cell: Cell) -> Self {
        Self::new(InvalidMoveKind::Occupied(cell))
    }

    /// Input that is not an integer.
    #[track_caller]
    pub fn not_a_number(input: impl Into<String>) -> Self {
        Self::new(InvalidMoveKind::NotANumber(input.into()))
    }

    /// Move attempted after the game ended.
    #[track_caller]
    pub fn game_over() -> Self {
        Self::new(InvalidMoveKind::GameOver)
    }

    /// Returns why the move was rejected.
    pub fn kind(&self) -> &InvalidMoveKind {
        &self.kind
    }

    /// True when the input never named a cell at all.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self.kind, InvalidMoveKind::NotANumber(_))
    }
}

impl PartialEq for InvalidMove {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for InvalidMove {}
