//! Executions: the atomic unit of board mutation.
//!
//! An execution is an ordered list of `(piece, destination)` steps. A destination
//! of `None` removes the piece. One step is an ordinary move or capture; two steps
//! cover castling (king then rook), en passant (mover then the captured pawn with
//! no destination) and promotion (the pawn arrives, then the new piece replaces it
//! on the same square).

use std::fmt;

use crate::square::Square;
use crate::types::{CastleSide, Color, Piece, PieceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub piece: Piece,
    pub to: Option<Square>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Execution {
    first: Step,
    second: Option<Step>,
}

impl Execution {
    pub fn single(piece: Piece, to: Square) -> Self {
        Self {
            first: Step {
                piece,
                to: Some(to),
            },
            second: None,
        }
    }

    pub fn castle(king: Piece, king_to: Square, rook: Piece, rook_to: Square) -> Self {
        Self {
            first: Step {
                piece: king,
                to: Some(king_to),
            },
            second: Some(Step {
                piece: rook,
                to: Some(rook_to),
            }),
        }
    }

    pub fn en_passant(pawn: Piece, to: Square, captured: Piece) -> Self {
        Self {
            first: Step {
                piece: pawn,
                to: Some(to),
            },
            second: Some(Step {
                piece: captured,
                to: None,
            }),
        }
    }

    /// Pawn move to the far rank, replaced there by a fresh piece of `kind`.
    pub fn promotion(pawn: Piece, to: Square, kind: PieceKind) -> Self {
        let promoted = Piece::new(pawn.color, kind, to);
        Self {
            first: Step {
                piece: pawn,
                to: Some(to),
            },
            second: Some(Step {
                piece: promoted,
                to: Some(to),
            }),
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        std::iter::once(&self.first).chain(self.second.as_ref())
    }

    pub fn first(&self) -> &Step {
        &self.first
    }

    pub fn second(&self) -> Option<&Step> {
        self.second.as_ref()
    }

    /// The piece that initiates the execution.
    pub fn mover(&self) -> &Piece {
        &self.first.piece
    }

    pub fn color(&self) -> Color {
        self.first.piece.color
    }

    /// Where the initiating piece ends up.
    pub fn destination(&self) -> Option<Square> {
        self.first.to
    }

    /// King-then-rook pair.
    pub fn is_castle(&self) -> bool {
        self.first.piece.kind == PieceKind::King
            && self
                .second
                .is_some_and(|s| s.piece.kind == PieceKind::Rook && s.to.is_some())
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        if !self.is_castle() {
            return None;
        }
        let to = self.first.to?;
        if to.file() > self.first.piece.square.file() {
            Some(CastleSide::Kingside)
        } else {
            Some(CastleSide::Queenside)
        }
    }

    pub fn is_en_passant(&self) -> bool {
        self.first.piece.kind == PieceKind::Pawn && self.second.is_some_and(|s| s.to.is_none())
    }

    /// Kind introduced by the second step of a promotion.
    pub fn promotion_kind(&self) -> Option<PieceKind> {
        if self.first.piece.kind != PieceKind::Pawn {
            return None;
        }
        self.second
            .filter(|s| s.to.is_some() && s.to == self.first.to)
            .map(|s| s.piece.kind)
    }

    /// Piece letter (omitted for pawns) plus destination, e.g. `Nf3`, `e4`, `e8=Q`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if self.first.piece.kind != PieceKind::Pawn {
            out.push(self.first.piece.kind.symbol());
        }
        if let Some(to) = self.first.to {
            out.push_str(&to.to_string());
        }
        if let Some(kind) = self.promotion_kind() {
            out.push('=');
            out.push(kind.symbol());
        }
        out
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
