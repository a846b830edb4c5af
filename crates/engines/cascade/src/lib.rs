//! Cascade Chess Engine
//!
//! Picks a move by running the legal executions through a pipeline of
//! selectors: forced mate, mate avoidance, exhaustive minimax over a static
//! evaluation, and finally a seeded random tie-break.
//!
//! # Example
//!
//! ```no_run
//! use cascade_engine::{CascadeEngine, EngineConfig};
//! use chess_core::Position;
//!
//! let mut engine = CascadeEngine::new(EngineConfig::default());
//! let mut pos = Position::startpos();
//! let played = engine.play(&mut pos).unwrap();
//! println!("engine played {played}");
//! ```

pub mod cache;
pub mod config;
pub mod eval;
pub mod search;
pub mod selectors;

pub use cache::{CacheKey, TranspositionCache};
pub use config::{ConfigError, EngineConfig, EvaluationMode, Weights};
pub use eval::{evaluate, Counter, Evaluator, MATE_SCORE};
pub use search::{rank_candidates, score_execution, SearchContext};
pub use selectors::*;

use chess_core::{play_engine_move, ChessError, Engine, Position, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

pub struct CascadeEngine {
    config: EngineConfig,
    rng: StdRng,
    stages: Vec<Stage>,
}

impl CascadeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rng: seeded_rng(config.seed),
            stages: pipeline(config.mode),
            config,
        }
    }

    /// Replace the pipeline, e.g. to drop or reorder stages.
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Search with the configured depth and budgets.
    pub fn choose(&mut self, pos: &Position) -> Result<SearchResult, ChessError> {
        let limits = self.config.search_limits();
        self.search(pos, limits)
    }

    /// Choose an execution, apply it to `pos` and describe it.
    pub fn play(&mut self, pos: &mut Position) -> Result<String, ChessError> {
        let limits = self.config.search_limits();
        play_engine_move(self, pos, limits)
    }
}

impl Default for CascadeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for CascadeEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> Result<SearchResult, ChessError> {
        limits.start();

        let mut ctx = SearchContext {
            weights: self.config.weights,
            depth: limits.depth,
            cascade_depth: self.config.cascade_depth,
            parallel: self.config.parallel,
            cache_capacity: self.config.cache_capacity,
            time_control: limits.time_control.clone(),
            rng: &mut self.rng,
            completed_depth: 0,
            stopped: false,
        };
        let decision = run_pipeline(pos, &self.stages, &mut ctx)?;
        let nodes = limits.time_control.nodes();

        info!(
            execution = %decision.execution.describe(),
            decided_by = decision.decided_by,
            score = ?decision.score,
            depth = ctx.completed_depth,
            nodes,
            elapsed_ms = limits.time_control.elapsed().as_millis() as u64,
            stopped = ctx.stopped,
            "search finished"
        );

        Ok(SearchResult {
            execution: decision.execution,
            score: decision.score,
            decided_by: decision.decided_by,
            depth: ctx.completed_depth,
            nodes,
            stopped: ctx.stopped,
        })
    }

    fn name(&self) -> &str {
        "Cascade v1.0"
    }

    fn author(&self) -> &str {
        "ML-chess"
    }

    fn new_game(&mut self) {
        self.rng = seeded_rng(self.config.seed);
    }
}
