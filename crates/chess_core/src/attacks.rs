//! Attack generation.
//!
//! Leapers (knight, king, pawn captures) use tables computed at compile time;
//! sliders ray-trace from their square, stopping on the first occupied square
//! (included) or the board edge.

use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::square::Square;
use crate::types::{Color, Piece, PieceKind};

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut idx = 0u8;
    while idx < 64 {
        let from = Square::from_index(idx);
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            if let Some(to) = from.offset(deltas[i].0, deltas[i].1) {
                bits |= 1u64 << to.index();
            }
            i += 1;
        }
        table[idx as usize] = Bitboard(bits);
        idx += 1;
    }
    table
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);

/// Pawn capture squares, indexed by [color][square].
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(1, 1), (-1, 1)]),
    leaper_table(&[(1, -1), (-1, -1)]),
];

#[inline(always)]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq.index()]
}

#[inline(always)]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Ray-trace along `dirs` until a blocker (included) or the edge.
pub fn slide(from: Square, occupied: Bitboard, dirs: &[(i8, i8)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cursor = from;
        while let Some(next) = cursor.offset(df, dr) {
            attacks.insert(next);
            if occupied.contains(next) {
                break;
            }
            cursor = next;
        }
    }
    attacks
}

/// Squares `piece` could capture on if an enemy stood there.
///
/// Pawns attack diagonally only; every other piece attacks exactly where it moves.
pub fn attacked_squares(piece: &Piece, pos: &Position) -> Bitboard {
    let from = piece.square;
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, piece.color),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::King => king_attacks(from),
        PieceKind::Bishop => slide(from, pos.occupied(), &DIAGONALS),
        PieceKind::Rook => slide(from, pos.occupied(), &ORTHOGONALS),
        PieceKind::Queen => {
            slide(from, pos.occupied(), &DIAGONALS) | slide(from, pos.occupied(), &ORTHOGONALS)
        }
    }
}

/// Union of the attack sets of every `color` piece.
pub fn attacked_by(pos: &Position, color: Color) -> Bitboard {
    let mut all = Bitboard::EMPTY;
    for piece in pos.pieces_of(color) {
        all |= attacked_squares(&piece, pos);
    }
    all
}

/// Is `target` in the attack set of any `by` piece?
///
/// Equivalent to scanning [`attacked_by`], but looks outward from the target
/// instead of generating every enemy attack set.
pub fn is_square_attacked(pos: &Position, target: Square, by: Color) -> bool {
    let hits = |squares: Bitboard, kinds: &[PieceKind]| {
        squares.into_iter().any(|sq| {
            pos.piece_at(sq)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        })
    };

    // A `by` pawn attacks target iff target's own-color pawn capture squares hold it.
    hits(pawn_attacks(target, by.other()), &[PieceKind::Pawn])
        || hits(knight_attacks(target), &[PieceKind::Knight])
        || hits(king_attacks(target), &[PieceKind::King])
        || hits(
            slide(target, pos.occupied(), &DIAGONALS),
            &[PieceKind::Bishop, PieceKind::Queen],
        )
        || hits(
            slide(target, pos.occupied(), &ORTHOGONALS),
            &[PieceKind::Rook, PieceKind::Queen],
        )
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
