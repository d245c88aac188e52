//! Core domain types for tic-tac-toe.

use super::cell::Cell;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player marker.
///
/// Rendered as lowercase `x` / `o` and parsed from either case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Player {
    /// Player x.
    #[serde(alias = "X")]
    X,
    /// Player o.
    #[serde(alias = "O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Picks x or o with equal probability.
    #[instrument(skip(rng))]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) { Player::X } else { Player::O }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Square::Empty => write!(f, " "),
            Square::Occupied(player) => write!(f, "{}", player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order, indexed by [`Cell::index`].
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Cell) -> Square {
        self.squares[cell.index()]
    }

    /// Sets the square at the given cell without any rule checks.
    pub(crate) fn set(&mut self, cell: Cell, square: Square) {
        self.squares[cell.index()] = square;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders three `a|b|c` rows separated by six dashes.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, squares) in self.squares.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "------")?;
            }
            writeln!(f, "{}|{}|{}", squares[0], squares[1], squares[2])?;
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    /// Returns true once the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} won!", player),
            GameStatus::Draw => write!(f, "It's a draw!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_display_is_lowercase() {
        assert_eq!(Player::X.to_string(), "x");
        assert_eq!(Player::O.to_string(), "o");
    }

    #[test]
    fn test_player_parses_either_case() {
        assert_eq!("x".parse::<Player>(), Ok(Player::X));
        assert_eq!("O".parse::<Player>(), Ok(Player::O));
        assert!("z".parse::<Player>().is_err());
    }

    #[test]
    fn test_player_deserializes_either_case() {
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, StrDeserializer};

        for (text, expected) in [("x", Player::X), ("X", Player::X), ("o", Player::O), ("O", Player::O)] {
            let de: StrDeserializer<'_, Error> = text.into_deserializer();
            assert_eq!(Player::deserialize(de), Ok(expected));
        }
    }

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }

    #[test]
    fn test_empty_board_renders_blank_grid() {
        let board = Board::new();
        assert_eq!(board.to_string(), " | | \n------\n | | \n------\n | | \n");
    }

    #[test]
    fn test_board_renders_markers() {
        let mut board = Board::new();
        board.set(Cell::TopLeft, Square::Occupied(Player::X));
        board.set(Cell::Center, Square::Occupied(Player::O));
        board.set(Cell::BottomRight, Square::Occupied(Player::X));
        assert_eq!(board.to_string(), "x| | \n------\n |o| \n------\n | |x\n");
        assert_eq!(board.occupied(), 3);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(GameStatus::Won(Player::O).to_string(), "Player o won!");
        assert_eq!(GameStatus::Draw.to_string(), "It's a draw!");
        assert!(!GameStatus::InProgress.is_over());
        assert_eq!(GameStatus::Draw.winner(), None);
    }
}
