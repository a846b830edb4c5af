//! Tests for game termination
//!
//! This module tests every end condition:
//! - Checkmate
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition

use chess_core::{Color, DrawReason, GameResult, Outcome, Position, side_legal_executions};

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_fools_mate() {
    let mut pos = Position::startpos();
    pos.play_line(["f3", "e5", "g4", "Qh4"]).unwrap();

    assert!(pos.is_king_in_check(Color::White));
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert!(pos.is_game_over());
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
    assert_eq!(pos.result(), GameResult::BlackWins);
    assert_eq!(pos.result().to_string(), "0-1");
}

#[test]
fn test_back_rank_mate_for_white() {
    let pos = fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert!(pos.is_checkmate());
    assert_eq!(pos.result().to_string(), "1-0");
}

#[test]
fn test_check_is_not_mate() {
    let pos = fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1");
    assert!(pos.is_king_in_check(Color::White));
    assert!(!pos.is_checkmate());
    assert!(!pos.is_game_over());
    assert_eq!(pos.result().to_string(), "");
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    assert!(side_legal_executions(&pos).is_empty());
    assert!(!pos.is_king_in_check(Color::Black));
    assert!(pos.is_stalemate());
    assert!(pos.is_draw());
    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::Stalemate)));
    assert_eq!(pos.result().to_string(), "1/2-1/2");
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king on g6, white pawn on g7, black king on g8
    let pos = fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
}

// =============================================================================
// Fifty-Move Rule Tests
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let pos = fen("8/8/8/4k3/8/4K3/8/8 w - - 100 60");
    assert!(pos.is_fifty_move_draw());
    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::FiftyMoveRule)));
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let pos = fen("8/8/8/4k3/8/4K3/8/8 w - - 99 60");
    assert!(!pos.is_fifty_move_draw());
    assert!(!pos.is_game_over());
}

#[test]
fn test_fifty_move_rule_past_100_halfmoves() {
    // A loaded position past the threshold is still a draw.
    let pos = fen("8/8/8/4k3/8/4K3/8/8 w - - 130 80");
    assert!(pos.is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_reached_by_quiet_move() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    pos.play_san("Kd2").unwrap();
    assert_eq!(pos.halfmove_clock, 100);
    assert!(pos.is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut pos = fen("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    pos.play_san("e3").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_reset_on_capture() {
    let mut pos = fen("7k/8/8/8/3n4/3K4/8/8 w - - 99 60");
    pos.play_san("Kxd4").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
}

// =============================================================================
// Repetition Tests
// =============================================================================

#[test]
fn test_threefold_repetition_with_kings_only() {
    let mut pos = fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let shuffle = ["Kd1", "Kd8", "Ke1", "Ke8"];

    pos.play_line(shuffle).unwrap();
    pos.play_line(shuffle).unwrap();
    assert!(!pos.is_draw_by_repetition());
    assert_eq!(pos.occurrences(), 2);

    pos.play_san("Kd1").unwrap();
    assert_eq!(pos.occurrences(), 3);
    assert!(pos.is_draw_by_repetition());
    assert_eq!(pos.outcome(), Some(Outcome::Draw(DrawReason::Repetition)));
    assert_eq!(pos.result(), GameResult::Draw);
}

#[test]
fn test_knight_shuffle_repetition_from_start() {
    let mut pos = Position::startpos();
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
    pos.play_line(shuffle).unwrap();
    pos.play_line(shuffle).unwrap();
    pos.play_line(shuffle).unwrap();
    assert!(pos.is_draw_by_repetition());
}

#[test]
fn test_two_occurrences_are_not_a_draw() {
    let mut pos = fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    pos.play_line(["Kd1", "Kd8", "Ke1", "Ke8", "e3"]).unwrap();
    pos.play_line(["Kd8", "Kd1", "Ke8", "Ke1", "Kd8", "Kd1", "Ke8"])
        .unwrap();
    assert_eq!(pos.occurrences(), 2);
    assert!(!pos.is_draw_by_repetition());
    assert!(!pos.is_game_over());
}
