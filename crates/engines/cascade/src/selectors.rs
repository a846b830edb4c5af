//! Selector pipeline.
//!
//! Each stage narrows the candidate executions by one criterion. The driver
//! stops as soon as a single candidate remains. A stage that would discard
//! every candidate is ignored and the previous set carries on to the next
//! stage.

use std::time::Instant;

use chess_core::{side_legal_executions, ChessError, Color, Execution, Position};
use rand::seq::SliceRandom;
use rayon::prelude::*;
use tracing::debug;

use crate::config::EvaluationMode;
use crate::eval::{Counter, Evaluator, MATE_SCORE};
use crate::search::{rank_candidates, SearchContext};

/// What a stage kept, and the score it kept them for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub score: Option<i64>,
    pub candidates: Vec<Execution>,
}

impl Selection {
    fn unscored(candidates: Vec<Execution>) -> Self {
        Self {
            score: None,
            candidates,
        }
    }
}

pub type SelectFn = fn(&Position, &[Execution], &mut SearchContext<'_>) -> Selection;

#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub select: SelectFn,
}

impl Stage {
    pub const fn new(name: &'static str, select: SelectFn) -> Self {
        Self { name, select }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Stage").field(&self.name).finish()
    }
}

pub const FORCED_MATE: Stage = Stage::new("forced_mate", forced_mate);
pub const MATE_AVOIDANCE: Stage = Stage::new("mate_avoidance", mate_avoidance);
pub const WEIGHTED: Stage = Stage::new("weighted", weighted);
pub const MATERIAL: Stage = Stage::new("material", material);
pub const KING_SAFETY: Stage = Stage::new("king_safety", king_safety);
pub const DEVELOPMENT: Stage = Stage::new("development", development);
pub const CENTRE_CONTROL: Stage = Stage::new("centre_control", centre_control);
pub const RANDOM: Stage = Stage::new("random", random);

/// The stage order for an evaluation mode. Always ends with the random tie-break.
pub fn pipeline(mode: EvaluationMode) -> Vec<Stage> {
    match mode {
        EvaluationMode::Combined => vec![FORCED_MATE, MATE_AVOIDANCE, WEIGHTED, RANDOM],
        EvaluationMode::Cascade => vec![
            FORCED_MATE,
            MATE_AVOIDANCE,
            MATERIAL,
            KING_SAFETY,
            DEVELOPMENT,
            CENTRE_CONTROL,
            RANDOM,
        ],
    }
}

/// The execution a pipeline settled on.
#[derive(Debug, Clone)]
pub struct Decision {
    pub execution: Execution,
    /// Latest score reported by a stage that ran
    pub score: Option<i64>,
    /// Last stage that shrank the candidate set
    pub decided_by: &'static str,
}

/// Narrow the side to move's legal executions down to one.
pub fn run_pipeline(
    pos: &Position,
    stages: &[Stage],
    ctx: &mut SearchContext<'_>,
) -> Result<Decision, ChessError> {
    let mut candidates = side_legal_executions(pos);
    if candidates.is_empty() {
        return Err(ChessError::GameOver);
    }

    let mut score = None;
    let mut decided_by = "only_move";

    for stage in stages {
        if candidates.len() == 1 {
            break;
        }
        let start = Instant::now();
        let before = candidates.len();
        let selection = (stage.select)(pos, &candidates, ctx);
        let after = selection.candidates.len();

        debug!(
            stage = stage.name,
            before,
            after,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "selector finished"
        );

        if selection.candidates.is_empty() {
            continue;
        }
        if selection.score.is_some() {
            score = selection.score;
        }
        if after < before {
            decided_by = stage.name;
        }
        candidates = selection.candidates;
    }

    match candidates.as_slice() {
        [execution] => Ok(Decision {
            execution: *execution,
            score,
            decided_by,
        }),
        _ => Err(ChessError::SearchExhausted {
            remaining: candidates.len(),
        }),
    }
}

fn mate_score(winner: Color) -> i64 {
    match winner {
        Color::White => MATE_SCORE,
        Color::Black => -MATE_SCORE,
    }
}

fn keep_where<F>(candidates: &[Execution], parallel: bool, keep: F) -> Vec<Execution>
where
    F: Fn(&Execution) -> bool + Sync,
{
    if parallel {
        candidates.par_iter().filter(|e| keep(e)).copied().collect()
    } else {
        candidates.iter().filter(|e| keep(e)).copied().collect()
    }
}

/// `exec` checkmates the opponent on the spot.
pub fn delivers_mate(pos: &Position, exec: &Execution) -> bool {
    pos.simulate(exec).is_checkmate()
}

/// The side to move has some execution that mates immediately.
pub fn has_mate_in_one(pos: &Position) -> bool {
    side_legal_executions(pos)
        .iter()
        .any(|exec| delivers_mate(pos, exec))
}

/// Every reply to `exec` leaves a mate in one. A reply-less result (stalemate
/// or mate) does not count.
pub fn forces_mate_next(pos: &Position, exec: &Execution) -> bool {
    let next = pos.simulate(exec);
    let replies = side_legal_executions(&next);
    !replies.is_empty()
        && replies
            .iter()
            .all(|reply| has_mate_in_one(&next.simulate(reply)))
}

/// The side to move can force mate within its next two moves.
pub fn has_forced_mate(pos: &Position) -> bool {
    let executions = side_legal_executions(pos);
    executions.iter().any(|exec| delivers_mate(pos, exec))
        || executions.iter().any(|exec| forces_mate_next(pos, exec))
}

/// Mates in one, or failing those, moves after which mate follows whatever the reply.
pub fn forced_mate(pos: &Position, candidates: &[Execution], ctx: &mut SearchContext<'_>) -> Selection {
    let score = Some(mate_score(pos.side_to_move));

    let mates = keep_where(candidates, ctx.parallel, |exec| delivers_mate(pos, exec));
    if !mates.is_empty() {
        return Selection {
            score,
            candidates: mates,
        };
    }

    let forcing = keep_where(candidates, ctx.parallel, |exec| forces_mate_next(pos, exec));
    if forcing.is_empty() {
        return Selection::default();
    }
    Selection {
        score,
        candidates: forcing,
    }
}

/// Drops candidates after which the opponent has a forced mate.
pub fn mate_avoidance(
    pos: &Position,
    candidates: &[Execution],
    ctx: &mut SearchContext<'_>,
) -> Selection {
    Selection::unscored(keep_where(candidates, ctx.parallel, |exec| {
        !has_forced_mate(&pos.simulate(exec))
    }))
}

/// Minimax over the weighted sum of every counter.
pub fn weighted(pos: &Position, candidates: &[Execution], ctx: &mut SearchContext<'_>) -> Selection {
    let evaluator = Evaluator::Combined(ctx.weights);
    let depth = ctx.depth;
    rank_candidates(pos, candidates, evaluator, depth, ctx)
}

fn single(
    counter: Counter,
    pos: &Position,
    candidates: &[Execution],
    ctx: &mut SearchContext<'_>,
) -> Selection {
    let depth = ctx.cascade_depth;
    rank_candidates(pos, candidates, Evaluator::Single(counter), depth, ctx)
}

pub fn material(pos: &Position, candidates: &[Execution], ctx: &mut SearchContext<'_>) -> Selection {
    single(Counter::Material, pos, candidates, ctx)
}

pub fn king_safety(
    pos: &Position,
    candidates: &[Execution],
    ctx: &mut SearchContext<'_>,
) -> Selection {
    single(Counter::KingSafety, pos, candidates, ctx)
}

pub fn development(
    pos: &Position,
    candidates: &[Execution],
    ctx: &mut SearchContext<'_>,
) -> Selection {
    single(Counter::Development, pos, candidates, ctx)
}

pub fn centre_control(
    pos: &Position,
    candidates: &[Execution],
    ctx: &mut SearchContext<'_>,
) -> Selection {
    single(Counter::CentreControl, pos, candidates, ctx)
}

/// Uniform tie-break.
pub fn random(_pos: &Position, candidates: &[Execution], ctx: &mut SearchContext<'_>) -> Selection {
    Selection::unscored(candidates.choose(&mut *ctx.rng).copied().into_iter().collect())
}

#[cfg(test)]
#[path = "selectors_tests.rs"]
mod selectors_tests;
