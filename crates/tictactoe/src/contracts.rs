//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions are checked on every move and are the
//! source of every [`InvalidMove`]. Postconditions compare the state before
//! and after a move and are checked in debug builds.

use super::action::InvalidMove;
use super::game::GameState;
use super::invariants::{
    HistoryConsistentInvariant, InvariantSet, InvariantViolation, MonotonicBoardInvariant,
};
use super::{Cell, GameStatus, Player, Square};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// What the precondition resolved the action to.
    type Target;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Target, InvalidMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell number must be 1-9.
pub struct CellInRange;

impl CellInRange {
    /// Resolves a cell number to a [`Cell`].
    #[instrument]
    pub fn check(number: usize) -> Result<Cell, InvalidMove> {
        Cell::from_number(number)
            .ok_or_else(|| InvalidMove::out_of_range(i64::try_from(number).unwrap_or(i64::MAX)))
    }
}

/// Precondition: the cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects a cell that already holds a marker.
    #[instrument(skip(game))]
    pub fn check(cell: Cell, game: &GameState) -> Result<(), InvalidMove> {
        if game.board().is_empty(cell) {
            Ok(())
        } else {
            Err(InvalidMove::occupied(cell))
        }
    }
}

/// Precondition: the game must still be in progress.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects moves once the game is won or drawn.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), InvalidMove> {
        if game.is_over() {
            Err(InvalidMove::game_over())
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Place contract
// ─────────────────────────────────────────────────────────────

/// Contract for marking a cell.
///
/// Preconditions:
/// - Cell number is 1-9
/// - Cell is empty
///
/// Postconditions:
/// - Exactly one move was recorded
/// - Every square filled before is unchanged
/// - Board remains monotonic and consistent with the history
pub struct PlaceContract;

impl Contract<GameState, (usize, Player)> for PlaceContract {
    type Target = Cell;

    fn pre(game: &GameState, action: &(usize, Player)) -> Result<Cell, InvalidMove> {
        let cell = CellInRange::check(action.0)?;
        CellIsEmpty::check(cell, game)?;
        Ok(cell)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if after.history().len() != before.history().len() + 1 {
            violations.push(InvariantViolation::new("Exactly one move is recorded per placement"));
        }

        let overwritten = Cell::ALL.iter().any(|cell| {
            let was = before.board().get(*cell);
            was != Square::Empty && was != after.board().get(*cell)
        });
        if overwritten {
            violations.push(InvariantViolation::new("Filled squares never change"));
        }

        if let Err(mut found) = <(MonotonicBoardInvariant, HistoryConsistentInvariant) as InvariantSet<
            GameState,
        >>::check_all(after)
        {
            violations.append(&mut found);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Placement postcondition failed");
            Err(violations)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Play contract
// ─────────────────────────────────────────────────────────────

/// Contract for a full turn.
///
/// Preconditions:
/// - Game is in progress
///
/// Postconditions:
/// - Everything [`PlaceContract`] guarantees
/// - The mover keeps the turn on a win or draw, the opponent gets it otherwise
pub struct PlayContract;

impl Contract<GameState, usize> for PlayContract {
    type Target = ();

    fn pre(game: &GameState, _cell: &usize) -> Result<(), InvalidMove> {
        GameNotOver::check(game)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match PlaceContract::post(before, after) {
            Ok(()) => Vec::new(),
            Err(found) => found,
        };

        let mover = before.current_player();
        let expected = match after.status() {
            GameStatus::InProgress => mover.opponent(),
            GameStatus::Won(winner) => {
                if winner != mover {
                    violations.push(InvariantViolation::new("Only the mover can win"));
                }
                mover
            }
            GameStatus::Draw => mover,
        };
        if after.current_player() != expected {
            violations.push(InvariantViolation::new(
                "Turn passes only after a non-terminal move",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Play postcondition failed");
            Err(violations)
        }
    }
}
