use std::fmt;

use tracing::trace;

use crate::attacks::is_square_attacked;
use crate::bitboard::Bitboard;
use crate::error::ChessError;
use crate::execution::Execution;
use crate::history::History;
use crate::square::Square;
use crate::types::*;
use crate::zobrist;

/// One snapshot of a game: placement, side to move and draw-tracking state.
///
/// Cloning is cheap enough to be the simulation primitive: the grid is a plain
/// array of `Copy` pieces and the repetition history is shared structurally.
#[derive(Clone, Debug)]
pub struct Position {
    squares: [Option<Piece>; 64],
    occupied: Bitboard,
    kings: [Option<Square>; 2],
    pub side_to_move: Color,
    /// Half-moves since the last capture or pawn move.
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    history: History,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// A board with no pieces.
    pub fn empty(side_to_move: Color) -> Self {
        Position {
            squares: [None; 64],
            occupied: Bitboard::EMPTY,
            kings: [None; 2],
            side_to_move,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: History::new(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty(Color::White);
        for color in [Color::White, Color::Black] {
            for file in 0..8u8 {
                if let Some(sq) = Square::new(file, color.pawn_rank()) {
                    p.put(Piece::new(color, PieceKind::Pawn, sq));
                }
                if let Some(sq) = Square::new(file, color.home_rank()) {
                    p.put(Piece::new(color, BACK_RANK[file as usize], sq));
                }
            }
        }
        p
    }

    /// Forsyth-Edwards Notation parser.
    ///
    /// Move-history flags are reconstructed from the castling and en-passant
    /// fields: a king or corner rook without a matching castling right counts as
    /// moved, and the pawn that just advanced two squares becomes the en-passant
    /// candidate. Missing clock fields default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let bad = |msg: &str| ChessError::InvalidFen(format!("{msg}: {fen:?}"));
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(bad("expected at least placement and side to move"));
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("invalid side to move")),
        };
        let mut pos = Position::empty(side_to_move);

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("placement needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let sq = Square::new(file, rank).ok_or_else(|| bad("too many files"))?;
                    let piece = Piece::from_letter(ch, sq).ok_or_else(|| bad("unknown piece"))?;
                    pos.put(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("too many files"));
                }
            }
            if file != 8 {
                return Err(bad("not enough files"));
            }
        }

        let castling = parts.get(2).copied().unwrap_or("-");
        if !castling.chars().all(|c| "KQkq-".contains(c)) {
            return Err(bad("invalid castling field"));
        }
        pos.derive_moved_flags(castling);

        let ep = parts.get(3).copied().unwrap_or("-");
        if ep != "-" {
            let target: Square = ep.parse().map_err(|_| bad("invalid en passant square"))?;
            let pawn_sq = target.offset(0, -side_to_move.forward());
            if let Some(sq) = pawn_sq
                && let Some(mut pawn) = pos.piece_at(sq)
                && pawn.kind == PieceKind::Pawn
                && pawn.color != side_to_move
            {
                pawn.en_passant_candidate = true;
                pos.put(pawn);
            }
        }

        if let Some(hmc) = parts.get(4) {
            pos.halfmove_clock = hmc.parse().map_err(|_| bad("invalid halfmove clock"))?;
        }
        if let Some(fmn) = parts.get(5) {
            pos.fullmove_number = fmn.parse().map_err(|_| bad("invalid fullmove number"))?;
        }
        Ok(pos)
    }

    fn derive_moved_flags(&mut self, castling: &str) {
        for sq in self.occupied {
            let Some(mut pc) = self.squares[sq.index()] else {
                continue;
            };
            let home = pc.color.home_rank();
            let (king_side, queen_side) = match pc.color {
                Color::White => (castling.contains('K'), castling.contains('Q')),
                Color::Black => (castling.contains('k'), castling.contains('q')),
            };
            pc.has_moved = match pc.kind {
                PieceKind::Pawn => sq.rank() != pc.color.pawn_rank(),
                PieceKind::King => !(sq.rank() == home && sq.file() == 4 && (king_side || queen_side)),
                PieceKind::Rook => {
                    let corner_right = sq.rank() == home
                        && ((sq.file() == 7 && king_side) || (sq.file() == 0 && queen_side));
                    !corner_right
                }
                kind => !(sq.rank() == home && BACK_RANK[sq.file() as usize] == kind),
            };
            self.squares[sq.index()] = Some(pc);
        }
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut blanks = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(pc) => {
                        if blanks > 0 {
                            out.push_str(&blanks.to_string());
                            blanks = 0;
                        }
                        out.push(pc.letter());
                    }
                    None => blanks += 1,
                }
            }
            if blanks > 0 {
                out.push_str(&blanks.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        let mut rights = String::new();
        for (color, letters) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            for (side, letter) in [CastleSide::Kingside, CastleSide::Queenside].into_iter().zip(letters) {
                if self.has_castling_right(color, side) {
                    rights.push(letter);
                }
            }
        }
        out.push(' ');
        out.push_str(if rights.is_empty() { "-" } else { &rights });

        let ep = self
            .pieces()
            .find(|pc| pc.en_passant_candidate)
            .and_then(|pc| pc.square.offset(0, -pc.color.forward()));
        out.push(' ');
        match ep {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// Unmoved king on its home square and unmoved rook in the matching corner.
    /// Says nothing about whether castling is playable right now.
    pub fn has_castling_right(&self, color: Color, side: CastleSide) -> bool {
        let home = color.home_rank();
        let king = Square::new(4, home).and_then(|sq| self.piece_at(sq));
        let rook = Square::new(side.rook_file(), home).and_then(|sq| self.piece_at(sq));
        matches!(king, Some(k) if k.kind == PieceKind::King && k.color == color && !k.has_moved)
            && matches!(rook, Some(r) if r.kind == PieceKind::Rook && r.color == color && !r.has_moved)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Place `piece` on its own square, replacing whatever stood there.
    pub fn put(&mut self, piece: Piece) {
        self.remove(piece.square);
        self.squares[piece.square.index()] = Some(piece);
        self.occupied.insert(piece.square);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.idx()] = Some(piece.square);
        }
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.squares[sq.index()].take();
        self.occupied.remove(sq);
        if let Some(pc) = removed
            && pc.kind == PieceKind::King
            && self.kings[pc.color.idx()] == Some(sq)
        {
            self.kings[pc.color.idx()] = None;
        }
        removed
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.occupied.filter_map(move |sq| self.squares[sq.index()])
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |pc| pc.color == color)
    }

    pub fn piece_count(&self) -> u32 {
        self.occupied.len()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.idx()]
    }

    /// Placement + side to move, used for repetition detection.
    pub fn signature(&self) -> u64 {
        zobrist::signature(self)
    }

    /// Signature plus legality-relevant flags, used for transposition caching.
    pub fn state_key(&self) -> u64 {
        zobrist::state_key(self)
    }

    /// Mutate this position by `execution`, without legality checks.
    ///
    /// En-passant candidacy of every piece expires first, then each step clears
    /// its piece's square and, if it has a destination, places the relocated
    /// piece there. Afterwards the side to move flips, the halfmove clock resets
    /// on a capture or pawn move, and the new signature is recorded.
    pub fn apply(&mut self, execution: &Execution) {
        let count_before = self.piece_count();

        for sq in self.occupied {
            if let Some(pc) = &mut self.squares[sq.index()] {
                pc.en_passant_candidate = false;
            }
        }

        for step in execution.steps() {
            self.remove(step.piece.square);
            if let Some(to) = step.to {
                self.put(step.piece.moved_to(to));
            }
        }

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        let pawn_moved = execution.mover().kind == PieceKind::Pawn;
        self.halfmove_clock = if pawn_moved || self.piece_count() < count_before {
            0
        } else {
            self.halfmove_clock + 1
        };

        let signature = self.signature();
        let seen = self.history.record(signature, self.halfmove_clock);
        trace!(execution = %execution, seen, "applied execution");
    }

    /// Copy this position and apply `execution` to the copy.
    pub fn simulate(&self, execution: &Execution) -> Position {
        let mut next = self.clone();
        next.apply(execution);
        next
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => is_square_attacked(self, ksq, color.other()),
            None => false,
        }
    }

    /// The side that just moved has not left its own king in check.
    pub fn is_state_valid(&self) -> bool {
        !self.is_king_in_check(self.side_to_move.other())
    }

    /// How often the current placement (with side to move) has been recorded.
    pub fn occurrences(&self) -> u32 {
        self.history.occurrences(self.signature())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Piece letters by rank (rank 8 first) and file, for external renderers.
    pub fn snapshot(&self) -> [[Option<char>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for pc in self.pieces() {
            grid[7 - pc.square.rank() as usize][pc.square.file() as usize] = Some(pc.letter());
        }
        grid
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.snapshot().iter().enumerate() {
            write!(f, "{} | ", 8 - i)?;
            for cell in row {
                write!(f, "{} ", cell.unwrap_or('_'))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    ---------------")?;
        writeln!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
