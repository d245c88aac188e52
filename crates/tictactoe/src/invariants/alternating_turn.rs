//! Alternating turn invariant: players alternate from the starting player.

use super::super::{GameState, GameStatus};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// The history starts with the starting player and never repeats a player
/// twice in a row. While the game is in progress the current player is the
/// next one in that alternation; once it is over the last mover keeps the
/// turn.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let history = game.history();

        let Some(last) = history.last() else {
            return game.current_player() == game.starting_player()
                && game.status() == GameStatus::InProgress;
        };

        if history[0].player != game.starting_player() {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].player == pair[1].player) {
            return false;
        }

        let expected = match game.status() {
            GameStatus::InProgress => last.player.opponent(),
            GameStatus::Won(winner) => {
                if winner != last.player {
                    return false;
                }
                winner
            }
            GameStatus::Draw => last.player,
        };

        game.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns from the starting player"
    }
}
