//! Blocking text loop that plays one game to the end.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use tictactoe::{GameState, GameStatus, InvalidMove};
use tracing::{debug, info, instrument, warn};

/// Prompt shown before every read.
pub const PROMPT: &str = "Enter cell number from 1 to 9: ";

/// Printed when the input is not an integer.
pub const INVALID_INPUT: &str = "Invalid input! Please enter a number between 1 and 9.";

/// Printed when the number is out of range or the cell is taken.
pub const INVALID_CELL: &str = "Invalid cell number! Please choose an empty cell between 1 and 9.";

/// Reads a cell number from one line of input.
///
/// Surrounding whitespace is ignored. Anything that is not an integer is a
/// parse failure; negative numbers and integers too large to hold are out
/// of range (saturated to the nearest `i64`).
#[instrument]
pub fn read_move(line: &str) -> Result<usize, InvalidMove> {
    let trimmed = line.trim();
    let number: i64 = trimmed.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => InvalidMove::out_of_range(i64::MAX),
        IntErrorKind::NegOverflow => InvalidMove::out_of_range(i64::MIN),
        _ => InvalidMove::not_a_number(trimmed),
    })?;
    usize::try_from(number).map_err(|_| InvalidMove::out_of_range(number))
}

/// Drives one game over a line-based input and a text output.
pub struct Driver<R, W> {
    game: GameState,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    /// Creates a driver for `game`.
    pub fn new(game: GameState, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Gives back the game and the output.
    pub fn into_parts(self) -> (GameState, W) {
        (self.game, self.output)
    }

    /// Plays until the game is won or drawn.
    ///
    /// Bad input is reported and asked for again; it never ends the loop.
    ///
    /// # Errors
    ///
    /// Fails if the input ends before the game does, or on I/O errors.
    #[instrument(skip(self), fields(first = %self.game.starting_player()))]
    pub fn run(&mut self) -> Result<GameStatus> {
        info!("Starting game loop");

        loop {
            self.render_board()?;
            writeln!(self.output, "Player {}'s turn", self.game.current_player())?;

            let Some(line) = self.prompt()? else {
                warn!(moves = self.game.history().len(), "Input closed mid-game");
                bail!("input closed before the game finished");
            };

            match read_move(&line).and_then(|cell| self.game.play(cell)) {
                Ok(GameStatus::InProgress) => {}
                Ok(status) => {
                    self.render_board()?;
                    writeln!(self.output, "{}", status)?;
                    self.output.flush()?;
                    info!(%status, "Game finished");
                    return Ok(status);
                }
                Err(err) => {
                    debug!(%err, "Move rejected");
                    let message = if err.is_parse_failure() {
                        INVALID_INPUT
                    } else {
                        INVALID_CELL
                    };
                    writeln!(self.output, "{}", message)?;
                }
            }
        }
    }

    fn render_board(&mut self) -> Result<()> {
        write!(self.output, "\n{}", self.game.board())?;
        Ok(())
    }

    /// Prompts and reads one line; `None` at end of input.
    fn prompt(&mut self) -> Result<Option<String>> {
        write!(self.output, "{}", PROMPT)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read move")?;
        Ok((read > 0).then_some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe::InvalidMoveKind;

    #[test]
    fn test_read_move_trims() {
        assert_eq!(read_move(" 5\n"), Ok(5));
        assert_eq!(read_move("+7"), Ok(7));
    }

    #[test]
    fn test_read_move_rejects_text() {
        for line in ["", "abc", "5.0", "five", "1 2"] {
            let err = read_move(line).unwrap_err();
            assert!(err.is_parse_failure(), "{:?}", line);
        }
    }

    #[test]
    fn test_read_move_negative_is_out_of_range() {
        let err = read_move("-3").unwrap_err();
        assert_eq!(err.kind(), &InvalidMoveKind::OutOfRange(-3));
    }

    #[test]
    fn test_read_move_passes_large_numbers_through() {
        assert_eq!(read_move("10"), Ok(10));
        assert_eq!(read_move("0"), Ok(0));
    }

    #[test]
    fn test_read_move_overflow_is_out_of_range() {
        let err = read_move("99999999999999999999").unwrap_err();
        assert!(!err.is_parse_failure());
        assert_eq!(err.kind(), &InvalidMoveKind::OutOfRange(i64::MAX));

        let err = read_move("-99999999999999999999").unwrap_err();
        assert_eq!(err.kind(), &InvalidMoveKind::OutOfRange(i64::MIN));
    }
}
