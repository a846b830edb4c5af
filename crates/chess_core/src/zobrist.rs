//! Zobrist hashing for position signatures and transposition keys.
//!
//! Two hashes are derived from the same key table:
//! - the *signature* (piece placement + side to move) drives repetition detection;
//! - the *state key* additionally folds in the move-history flags that change
//!   legality or evaluation (non-pawn `has_moved`, en-passant candidacy, castled
//!   kings), so two positions with equal state keys have the same legal moves.

use crate::board::Position;
use crate::types::{Color, Piece, PieceKind};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when black is to move
    pub side_to_move: u64,
    /// Non-pawn piece on this square has moved
    pub moved: [u64; 64],
    /// Pawn on this square may be captured en passant
    pub en_passant: [u64; 64],
    /// King of this color has castled
    pub castled: [u64; 2],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x9E3779B97F4A7C15u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut moved = [0u64; 64];
        let mut en_passant = [0u64; 64];
        let mut sq = 0;
        while sq < 64 {
            state = xorshift64(state);
            moved[sq] = state;
            state = xorshift64(state);
            en_passant[sq] = state;
            sq += 1;
        }

        state = xorshift64(state);
        let white_castled = state;
        state = xorshift64(state);
        let black_castled = state;

        ZobristKeys {
            pieces,
            side_to_move,
            moved,
            en_passant,
            castled: [white_castled, black_castled],
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: &Piece) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][piece.square.index()]
    }

    /// Contribution of a piece's history flags to the state key.
    #[inline]
    pub fn flags_key(&self, piece: &Piece) -> u64 {
        let sq = piece.square.index();
        let mut h = 0;
        if piece.has_moved && piece.kind != PieceKind::Pawn {
            h ^= self.moved[sq];
        }
        if piece.en_passant_candidate {
            h ^= self.en_passant[sq];
        }
        if piece.has_castled {
            h ^= self.castled[piece.color.idx()];
        }
        h
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Placement + side to move.
pub fn signature(pos: &Position) -> u64 {
    let mut h = 0;
    for piece in pos.pieces() {
        h ^= ZOBRIST.piece_key(&piece);
    }
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.side_to_move;
    }
    h
}

/// Signature plus the flags that affect legality and evaluation.
pub fn state_key(pos: &Position) -> u64 {
    let mut h = 0;
    for piece in pos.pieces() {
        h ^= ZOBRIST.piece_key(&piece) ^ ZOBRIST.flags_key(&piece);
    }
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.side_to_move;
    }
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
