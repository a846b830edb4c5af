//! Static evaluation from White's point of view.
//!
//! Every counter returns White's count minus Black's. Positive scores favour
//! White regardless of who is to move, so minimax maximises on White's turns
//! and minimises on Black's.

use chess_core::{
    attacked_squares, is_castle_available, Bitboard, CastleSide, Color, PieceKind, Position,
};

use crate::config::Weights;

/// Magnitude of a checkmate before weighting.
pub const MATE_SCORE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Checkmate,
    Material,
    KingSafety,
    Development,
    CentreControl,
}

impl Counter {
    pub const ALL: [Counter; 5] = [
        Counter::Checkmate,
        Counter::Material,
        Counter::KingSafety,
        Counter::Development,
        Counter::CentreControl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Counter::Checkmate => "checkmate",
            Counter::Material => "material",
            Counter::KingSafety => "king_safety",
            Counter::Development => "development",
            Counter::CentreControl => "centre_control",
        }
    }

    pub fn count(self, pos: &Position) -> i64 {
        match self {
            Counter::Checkmate => count_checkmate(pos),
            Counter::Material => count_material(pos),
            Counter::KingSafety => count_king_safety(pos),
            Counter::Development => count_development(pos),
            Counter::CentreControl => count_centre_control(pos),
        }
    }
}

/// The scoring function a minimax stage applies at its leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluator {
    Combined(Weights),
    Single(Counter),
}

impl Evaluator {
    pub fn evaluate(&self, pos: &Position) -> i64 {
        match *self {
            Evaluator::Single(counter) => counter.count(pos),
            Evaluator::Combined(w) => {
                w.checkmate * count_checkmate(pos)
                    + w.material * count_material(pos)
                    + w.king_safety * count_king_safety(pos)
                    + w.development * count_development(pos)
                    + w.centre_control * count_centre_control(pos)
            }
        }
    }
}

pub fn evaluate(pos: &Position, evaluator: &Evaluator) -> i64 {
    evaluator.evaluate(pos)
}

fn white_minus_black(pos: &Position, per_color: impl Fn(Color) -> i64) -> i64 {
    per_color(Color::White) - per_color(Color::Black)
}

/// Signed toward the side that delivered mate.
pub fn count_checkmate(pos: &Position) -> i64 {
    if !pos.is_checkmate() {
        return 0;
    }
    match pos.side_to_move {
        Color::White => -MATE_SCORE,
        Color::Black => MATE_SCORE,
    }
}

pub fn count_material(pos: &Position) -> i64 {
    white_minus_black(pos, |color| {
        pos.pieces_of(color).map(|pc| pc.kind.value()).sum()
    })
}

/// Three for a castled king, one per side castling is playable right now.
pub fn count_king_safety(pos: &Position) -> i64 {
    white_minus_black(pos, |color| {
        let Some(king) = pos.king_square(color).and_then(|sq| pos.piece_at(sq)) else {
            return 0;
        };
        let mut score = 0;
        if king.has_castled {
            score += 3;
        }
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if is_castle_available(&king, pos, side) {
                score += 1;
            }
        }
        score
    })
}

/// Total size of every piece's attack set.
pub fn count_development(pos: &Position) -> i64 {
    white_minus_black(pos, |color| {
        pos.pieces_of(color)
            .map(|pc| attacked_squares(&pc, pos).len() as i64)
            .sum()
    })
}

/// Pieces on the four centre squares, attacks on them, and one point for each
/// of king and queen still unmoved.
pub fn count_centre_control(pos: &Position) -> i64 {
    white_minus_black(pos, |color| {
        pos.pieces_of(color)
            .map(|pc| {
                let mut score = (attacked_squares(&pc, pos) & Bitboard::CENTRE).len() as i64;
                if Bitboard::CENTRE.contains(pc.square) {
                    score += 1;
                }
                if matches!(pc.kind, PieceKind::King | PieceKind::Queen) && !pc.has_moved {
                    score += 1;
                }
                score
            })
            .sum()
    })
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
