//! Move descriptors: a decomposed move request resolved against the legal executions.

use std::fmt;

use tracing::debug;

use crate::board::Position;
use crate::error::ChessError;
use crate::execution::Execution;
use crate::movegen::side_legal_executions;
use crate::square::Square;
use crate::types::{CastleSide, PieceKind};

/// File or rank hint used when several same-kind pieces reach the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disambiguator {
    File(u8),
    Rank(u8),
}

impl Disambiguator {
    pub fn matches(self, sq: Square) -> bool {
        match self {
            Disambiguator::File(f) => sq.file() == f,
            Disambiguator::Rank(r) => sq.rank() == r,
        }
    }
}

impl fmt::Display for Disambiguator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match *self {
            Disambiguator::File(file) => (b'a' + file) as char,
            Disambiguator::Rank(rank) => (b'1' + rank) as char,
        };
        write!(f, "{ch}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDescriptor {
    Regular {
        kind: PieceKind,
        disambiguator: Option<Disambiguator>,
        destination: Square,
        promotion: Option<PieceKind>,
    },
    Castle(CastleSide),
}

impl MoveDescriptor {
    pub fn regular(kind: PieceKind, destination: Square) -> Self {
        MoveDescriptor::Regular {
            kind,
            disambiguator: None,
            destination,
            promotion: None,
        }
    }

    pub fn matches(&self, exec: &Execution) -> bool {
        match *self {
            MoveDescriptor::Castle(side) => exec.castle_side() == Some(side),
            MoveDescriptor::Regular {
                kind,
                disambiguator,
                destination,
                promotion,
            } => {
                let mover = exec.mover();
                mover.kind == kind
                    && !exec.is_castle()
                    && exec.destination() == Some(destination)
                    && disambiguator.is_none_or(|d| d.matches(mover.square))
                    && promotion.is_none_or(|p| exec.promotion_kind() == Some(p))
            }
        }
    }

    /// Every legal execution of the side to move this descriptor could mean.
    pub fn candidates(&self, pos: &Position) -> Vec<Execution> {
        let mut legal = side_legal_executions(pos);
        legal.retain(|exec| self.matches(exec));
        legal
    }

    /// The single legal execution this descriptor names.
    pub fn resolve(&self, pos: &Position) -> Result<Execution, ChessError> {
        let mut candidates = self.candidates(pos);
        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            0 => {
                debug!(descriptor = %self, "no legal execution matches");
                Err(ChessError::IllegalMove(self.to_string()))
            }
            n => {
                debug!(descriptor = %self, matches = n, "descriptor is ambiguous");
                Err(ChessError::AmbiguousMove(self.to_string()))
            }
        }
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveDescriptor::Castle(side) => f.write_str(side.notation()),
            MoveDescriptor::Regular {
                kind,
                disambiguator,
                destination,
                promotion,
            } => {
                if kind != PieceKind::Pawn {
                    write!(f, "{}", kind.symbol())?;
                }
                if let Some(d) = disambiguator {
                    write!(f, "{d}")?;
                }
                write!(f, "{destination}")?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.symbol())?;
                }
                Ok(())
            }
        }
    }
}

impl Position {
    /// Apply `exec` only if it is one of the side to move's legal executions.
    pub fn make_move(&mut self, exec: &Execution) -> Result<(), ChessError> {
        if !side_legal_executions(self).contains(exec) {
            debug!(execution = %exec, "rejected execution");
            return Err(ChessError::IllegalMove(exec.describe()));
        }
        self.apply(exec);
        Ok(())
    }

    /// Resolve `descriptor` and apply it. The position is untouched on error.
    pub fn play(&mut self, descriptor: &MoveDescriptor) -> Result<Execution, ChessError> {
        let exec = descriptor.resolve(self)?;
        self.apply(&exec);
        Ok(exec)
    }

    /// Parse algebraic move text and play it.
    pub fn play_san(&mut self, text: &str) -> Result<Execution, ChessError> {
        let descriptor: MoveDescriptor = text.parse()?;
        self.play(&descriptor)
    }

    /// Play a sequence of algebraic moves, stopping at the first failure.
    pub fn play_line<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<Execution>, ChessError> {
        moves.into_iter().map(|m| self.play_san(m)).collect()
    }
}
