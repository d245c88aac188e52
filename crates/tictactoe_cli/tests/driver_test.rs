//! End-to-end tests for the text driver.

use std::io::Cursor;
use tictactoe::{GameState, GameStatus, Player};
use tictactoe_cli::{Driver, INVALID_CELL, INVALID_INPUT, PROMPT};

fn play(first: Player, input: &str) -> (anyhow::Result<GameStatus>, GameState, String) {
    let mut driver = Driver::new(
        GameState::starting_with(first),
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
    );
    let result = driver.run();
    let (game, output) = driver.into_parts();
    (result, game, String::from_utf8(output).expect("utf-8 output"))
}

#[test]
fn test_win_transcript() {
    let (result, game, output) = play(Player::X, "1\n4\n2\n5\n3\n");

    assert_eq!(result.unwrap(), GameStatus::Won(Player::X));
    assert_eq!(game.winner(), Some(Player::X));
    assert!(output.starts_with("\n | | \n------\n | | \n------\n | | \nPlayer x's turn\n"));
    assert!(output.ends_with("\nx|x|x\n------\no|o| \n------\n | | \nPlayer x won!\n"));
    assert_eq!(output.matches(PROMPT).count(), 5);
}

#[test]
fn test_turn_announcements_alternate() {
    let (_, _, output) = play(Player::O, "1\n4\n2\n5\n3\n");

    let turns: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("'s turn"))
        .collect();
    assert_eq!(
        turns,
        vec![
            "Player o's turn",
            "Player x's turn",
            "Player o's turn",
            "Player x's turn",
            "Player o's turn",
        ]
    );
    assert!(output.ends_with("Player o won!\n"));
}

#[test]
fn test_draw_transcript() {
    let (result, game, output) = play(Player::X, "1\n2\n3\n5\n4\n6\n8\n7\n9\n");

    assert_eq!(result.unwrap(), GameStatus::Draw);
    assert!(game.is_full());
    assert!(output.ends_with("\nx|o|x\n------\nx|o|o\n------\no|x|x\nIt's a draw!\n"));
}

#[test]
fn test_bad_input_is_reported_and_retried() {
    let (result, game, output) = play(Player::X, "hello\n1\n1\n0\n10\n-2\n4\n2\n5\n3\n");

    assert_eq!(result.unwrap(), GameStatus::Won(Player::X));
    assert_eq!(output.matches(INVALID_INPUT).count(), 1);
    assert_eq!(output.matches(INVALID_CELL).count(), 4);
    assert_eq!(game.history().len(), 5);
}

#[test]
fn test_huge_number_is_an_invalid_cell() {
    let (result, _, output) = play(Player::X, "99999999999999999999\n1\n4\n2\n5\n3\n");

    assert_eq!(result.unwrap(), GameStatus::Won(Player::X));
    assert_eq!(output.matches(INVALID_INPUT).count(), 0);
    assert_eq!(output.matches(INVALID_CELL).count(), 1);
}

#[test]
fn test_rejected_move_keeps_turn() {
    let (_, _, output) = play(Player::O, "5\n5\n1\n");

    let turns: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("'s turn"))
        .collect();
    // o, x, x again after the rejected repeat, then o
    assert_eq!(
        turns,
        vec![
            "Player o's turn",
            "Player x's turn",
            "Player x's turn",
            "Player o's turn",
        ]
    );
}

#[test]
fn test_input_closed_mid_game_is_an_error() {
    let (result, game, output) = play(Player::X, "1\n2\n");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("input closed"));
    assert_eq!(game.history().len(), 2);
    assert!(!game.is_over());
    assert!(output.ends_with(PROMPT));
}
