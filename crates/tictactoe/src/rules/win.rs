//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player, Square};
use tracing::instrument;

/// The 8 winning triples: rows, columns, then diagonals.
pub const WINNING_TRIPLES: [[Cell; 3]; 8] = [
    // Rows: {1,2,3} {4,5,6} {7,8,9}
    [Cell::TopLeft, Cell::TopCenter, Cell::TopRight],
    [Cell::MiddleLeft, Cell::Center, Cell::MiddleRight],
    [Cell::BottomLeft, Cell::BottomCenter, Cell::BottomRight],
    // Columns: {1,4,7} {2,5,8} {3,6,9}
    [Cell::TopLeft, Cell::MiddleLeft, Cell::BottomLeft],
    [Cell::TopCenter, Cell::Center, Cell::BottomCenter],
    [Cell::TopRight, Cell::MiddleRight, Cell::BottomRight],
    // Diagonals: {3,5,7} {1,5,9}
    [Cell::TopRight, Cell::Center, Cell::BottomLeft],
    [Cell::TopLeft, Cell::Center, Cell::BottomRight],
];

/// Returns true if `player` occupies every cell of some winning triple.
#[instrument(skip(board))]
pub fn has_won(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    WINNING_TRIPLES
        .iter()
        .any(|triple| triple.iter().all(|cell| board.get(*cell) == mark))
}
