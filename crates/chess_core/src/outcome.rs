//! Game termination: checkmate, stalemate, repetition and the fifty-move rule.

use std::fmt;

use crate::board::Position;
use crate::movegen::has_legal_execution;
use crate::types::Color;

/// Half-moves without a capture or pawn move that end the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that end the game.
pub const REPETITION_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    Repetition,
    FiftyMoveRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Draw(DrawReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Ongoing,
}

impl GameResult {
    /// PGN-style result tag; empty while the game is still running.
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Ongoing => "",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<Outcome>> for GameResult {
    fn from(outcome: Option<Outcome>) -> Self {
        match outcome {
            Some(Outcome::Checkmate { winner: Color::White }) => GameResult::WhiteWins,
            Some(Outcome::Checkmate { winner: Color::Black }) => GameResult::BlackWins,
            Some(Outcome::Draw(_)) => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }
}

impl Position {
    /// Side to move is in check and has no legal execution.
    pub fn is_checkmate(&self) -> bool {
        self.is_king_in_check(self.side_to_move) && !has_legal_execution(self)
    }

    /// Side to move is not in check but has no legal execution.
    pub fn is_stalemate(&self) -> bool {
        !self.is_king_in_check(self.side_to_move) && !has_legal_execution(self)
    }

    /// Some signature has been recorded three times within its lookback window.
    pub fn is_draw_by_repetition(&self) -> bool {
        self.history().peak() >= REPETITION_LIMIT
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_draw_by_repetition() || self.is_fifty_move_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// How the game ended, if it has. Checkmate wins over any draw condition.
    pub fn outcome(&self) -> Option<Outcome> {
        if !has_legal_execution(self) {
            return Some(if self.is_king_in_check(self.side_to_move) {
                Outcome::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            });
        }
        if self.is_draw_by_repetition() {
            return Some(Outcome::Draw(DrawReason::Repetition));
        }
        if self.is_fifty_move_draw() {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    pub fn result(&self) -> GameResult {
        self.outcome().into()
    }
}
