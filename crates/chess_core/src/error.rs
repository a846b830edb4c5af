//! Error types shared by the rules engine and the search engines built on it.

use thiserror::Error;

/// Errors raised while applying moves or selecting them.
///
/// `IllegalMove` and `AmbiguousMove` are recoverable: they are raised before the
/// position is touched, so callers can simply ask for another move.
/// `SearchExhausted` signals a defect in a selector pipeline and should not be
/// papered over.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("illegal move {0}")]
    IllegalMove(String),

    #[error("ambiguous move {0}")]
    AmbiguousMove(String),

    #[error("selector pipeline never narrowed to one move ({remaining} candidates left)")]
    SearchExhausted { remaining: usize },

    #[error("game is already over")]
    GameOver,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Errors from parsing algebraic move text into a move descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move")]
    Empty,

    #[error("invalid square {0:?}")]
    InvalidSquare(String),

    #[error("unknown piece letter {0:?}")]
    InvalidPiece(char),

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(String),

    #[error("malformed move {0:?}")]
    Malformed(String),
}
