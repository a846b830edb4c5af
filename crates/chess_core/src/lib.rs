pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod descriptor;
pub mod error;
pub mod execution;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod square;
pub mod time_control;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use descriptor::*;
pub use error::*;
pub use execution::*;
pub use history::History;
pub use movegen::*;
pub use outcome::*;
pub use perft::{divide, perft};
pub use square::Square;
pub use time_control::*;
pub use types::*;
pub use zobrist::ZOBRIST;

use tracing::info;

// =============================================================================
// Engine trait: implemented by every move-selecting engine
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen execution
    pub execution: Execution,
    /// Score of the chosen execution, when a scoring stage decided it
    pub score: Option<i64>,
    /// Name of the pipeline stage that narrowed the candidates to one
    pub decided_by: &'static str,
    /// Deepest fully completed search depth
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search budget ran out before the requested depth
    pub stopped: bool,
}

/// Trait that all engines must implement.
pub trait Engine: Send {
    /// Pick one legal execution for the side to move.
    ///
    /// Fails with [`ChessError::GameOver`] when there is nothing to play and
    /// with [`ChessError::SearchExhausted`] if selection never settles on a
    /// single execution.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> Result<SearchResult, ChessError>;

    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "chess_core"
    }

    /// Reset internal state for a new game (clear caches, reseed, etc.)
    fn new_game(&mut self) {}
}

/// Let `engine` choose an execution, apply it, and describe it (`Nf3`, `e4`, `e8=Q`).
pub fn play_engine_move(
    engine: &mut dyn Engine,
    pos: &mut Position,
    limits: SearchLimits,
) -> Result<String, ChessError> {
    if pos.is_game_over() {
        return Err(ChessError::GameOver);
    }
    let result = engine.search(pos, limits)?;
    pos.make_move(&result.execution)?;
    let description = result.execution.describe();
    info!(
        engine = engine.name(),
        execution = %description,
        decided_by = result.decided_by,
        nodes = result.nodes,
        "engine moved"
    );
    Ok(description)
}
