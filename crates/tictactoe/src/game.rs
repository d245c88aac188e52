//! The game state machine.

use super::action::{InvalidMove, Move};
use super::contracts::{Contract, PlaceContract, PlayContract};
use super::{Board, Cell, GameStatus, Player, Square, rules};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete state of one game.
///
/// Owns the board and whose turn it is. The board only changes through
/// [`GameState::place`]; [`GameState::play`] drives the turn and
/// terminal-state transitions on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) starting_player: Player,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<Move>,
}

impl GameState {
    /// Creates a new game with a uniformly random starting player.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Creates a new game, drawing the starting player from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::starting_with(Player::random(rng))
    }

    /// Creates a new game where `first` moves first.
    #[instrument]
    pub fn starting_with(first: Player) -> Self {
        info!(%first, "New game");
        Self {
            board: Board::new(),
            current_player: first,
            starting_player: first,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Rebuilds a game by playing `cells` (numbered 1-9) in order.
    ///
    /// Stops early once the game ends; later cells are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first move that was rejected.
    #[instrument]
    pub fn replay(first: Player, cells: &[usize]) -> Result<Self, InvalidMove> {
        let mut game = Self::starting_with(first);
        for &cell in cells {
            if game.play(cell)?.is_over() {
                break;
            }
        }
        Ok(game)
    }

    /// Marks `cell` (numbered 1-9) for `player`.
    ///
    /// Does not touch the turn or the status; see [`GameState::play`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the cell is outside 1-9 or already
    /// occupied. Nothing is changed in that case.
    #[instrument(skip(self), fields(occupied = self.board.occupied()))]
    pub fn place(&mut self, cell: usize, player: Player) -> Result<(), InvalidMove> {
        let target = PlaceContract::pre(self, &(cell, player))?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set(target, Square::Occupied(player));
        self.history.push(Move::new(player, target));
        debug!(%player, cell = target.number(), "Mark placed");

        #[cfg(debug_assertions)]
        if let Err(violations) = PlaceContract::post(&before, self) {
            panic!("place broke game invariants: {:?}", violations);
        }

        Ok(())
    }

    /// Plays `cell` for the current player and advances the game.
    ///
    /// A win or a full board ends the game; otherwise the turn passes to
    /// the opponent. Returns the resulting status.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the game is over or the cell cannot be
    /// marked. The board, turn and status are unchanged in that case.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn play(&mut self, cell: usize) -> Result<GameStatus, InvalidMove> {
        PlayContract::pre(self, &cell)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.current_player;
        self.place(cell, player)?;

        if self.has_won(player) {
            self.status = GameStatus::Won(player);
            info!(%player, moves = self.history.len(), "Game won");
        } else if self.is_full() {
            self.status = GameStatus::Draw;
            info!("Game drawn");
        } else {
            self.swap_turn();
        }

        #[cfg(debug_assertions)]
        if let Err(violations) = PlayContract::post(&before, self) {
            panic!("play broke game invariants: {:?}", violations);
        }

        Ok(self.status)
    }

    /// Returns true if `player` holds a complete winning triple.
    pub fn has_won(&self, player: Player) -> bool {
        rules::has_won(&self.board, player)
    }

    /// Returns true if every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// Passes the turn to the other player.
    #[instrument(skip(self), fields(from = %self.current_player))]
    pub fn swap_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    ///
    /// After a win this is the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the player who moved first.
    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Returns true once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the empty cells in board order.
    pub fn valid_cells(&self) -> Vec<Cell> {
        Cell::valid_moves(&self.board)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvalidMoveKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_game_is_empty() {
        let game = GameState::new();
        assert!(game.board().squares().iter().all(|s| *s == Square::Empty));
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player(), game.starting_player());
        assert!(game.history().is_empty());
        assert_eq!(game.valid_cells().len(), 9);
    }

    #[test]
    fn test_seeded_start_is_deterministic() {
        let a = GameState::with_rng(&mut StdRng::seed_from_u64(7));
        let b = GameState::with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.starting_player(), b.starting_player());
    }

    #[test]
    fn test_both_players_can_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let starters: Vec<Player> = (0..64)
            .map(|_| GameState::with_rng(&mut rng).starting_player())
            .collect();
        assert!(starters.contains(&Player::X));
        assert!(starters.contains(&Player::O));
    }

    #[test]
    fn test_place_sets_cell_only() {
        let mut game = GameState::starting_with(Player::X);
        game.place(5, Player::O).unwrap();
        assert_eq!(game.board().get(Cell::Center), Square::Occupied(Player::O));
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.history(), &[Move::new(Player::O, Cell::Center)]);
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut game = GameState::starting_with(Player::X);
        for cell in [0, 10, 100] {
            let err = game.place(cell, Player::X).unwrap_err();
            assert_eq!(err.kind(), &InvalidMoveKind::OutOfRange(cell as i64));
        }
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_play_swaps_turn_only_when_game_continues() {
        let mut game = GameState::starting_with(Player::O);
        assert_eq!(game.play(1).unwrap(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.play(4).unwrap(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Player::O);
    }

    #[test]
    fn test_winner_keeps_the_turn() {
        let game = GameState::replay(Player::X, &[1, 4, 2, 5, 3]).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.winner(), Some(Player::X));
    }

    #[test]
    fn test_play_after_game_over_is_rejected() {
        let mut game = GameState::replay(Player::X, &[1, 4, 2, 5, 3]).unwrap();
        let before = game.clone();
        let err = game.play(9).unwrap_err();
        assert_eq!(err.kind(), &InvalidMoveKind::GameOver);
        assert_eq!(game, before);
    }

    #[test]
    fn test_swap_turn_flips() {
        let mut game = GameState::starting_with(Player::X);
        game.swap_turn();
        assert_eq!(game.current_player(), Player::O);
        game.swap_turn();
        assert_eq!(game.current_player(), Player::X);
    }

    #[test]
    fn test_replay_stops_at_terminal_state() {
        let game = GameState::replay(Player::X, &[1, 4, 2, 5, 3, 6, 7]).unwrap();
        assert_eq!(game.history().len(), 5);
    }
}
