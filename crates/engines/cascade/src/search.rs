//! Exhaustive depth-limited minimax with iterative deepening.

use std::time::Instant;

use chess_core::{side_legal_executions, Color, Execution, Position, TimeControl};
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cache::{CacheKey, TranspositionCache};
use crate::config::Weights;
use crate::eval::Evaluator;
use crate::selectors::Selection;

/// Per-search state threaded through every pipeline stage.
pub struct SearchContext<'a> {
    pub weights: Weights,
    /// Minimax depth of the combined stage
    pub depth: u8,
    /// Minimax depth of each single-counter stage
    pub cascade_depth: u8,
    pub parallel: bool,
    pub cache_capacity: usize,
    pub time_control: TimeControl,
    pub rng: &'a mut StdRng,
    /// Deepest iteration any scoring stage completed
    pub completed_depth: u8,
    /// A scoring stage ran out of budget
    pub stopped: bool,
}

/// Score every candidate by minimax and keep the best ones for the side to move.
///
/// Depths 0 through `depth` are searched in turn. If the budget runs out, the
/// scores of the deepest completed iteration are used; if not even depth 0
/// completed, whatever candidates were scored so far.
pub fn rank_candidates(
    pos: &Position,
    candidates: &[Execution],
    evaluator: Evaluator,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Selection {
    let tc = ctx.time_control.clone();
    let mut completed: Option<Vec<(Execution, i64)>> = None;
    let mut partial: Vec<(Execution, i64)> = Vec::new();

    let mut shared = TranspositionCache::new(ctx.cache_capacity);
    let per_worker = (ctx.cache_capacity / candidates.len().max(1)).max(1024);
    let mut caches: Vec<TranspositionCache> = if ctx.parallel {
        candidates.iter().map(|_| TranspositionCache::new(per_worker)).collect()
    } else {
        Vec::new()
    };

    for d in 0..=depth {
        let start = Instant::now();
        let scores: Vec<Option<i64>> = if ctx.parallel {
            caches
                .par_iter_mut()
                .zip(candidates.par_iter())
                .map(|(cache, exec)| score_execution(pos, exec, d, &evaluator, cache, &tc))
                .collect()
        } else {
            let mut scores = Vec::with_capacity(candidates.len());
            for exec in candidates {
                let score = score_execution(pos, exec, d, &evaluator, &mut shared, &tc);
                let done = score.is_none();
                scores.push(score);
                if done {
                    break;
                }
            }
            scores
        };

        let scored: Vec<(Execution, i64)> = candidates
            .iter()
            .zip(&scores)
            .filter_map(|(exec, score)| score.map(|s| (*exec, s)))
            .collect();

        if scored.len() == candidates.len() {
            debug!(
                depth = d,
                candidates = candidates.len(),
                nodes = tc.nodes(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "minimax iteration complete"
            );
            ctx.completed_depth = ctx.completed_depth.max(d);
            completed = Some(scored);
        } else {
            warn!(
                depth = d,
                scored = scored.len(),
                candidates = candidates.len(),
                nodes = tc.nodes(),
                "search budget exhausted, using last completed iteration"
            );
            ctx.stopped = true;
            partial = scored;
            break;
        }
    }

    let scored = completed.unwrap_or(partial);
    keep_best(&scored, pos.side_to_move)
}

fn keep_best(scored: &[(Execution, i64)], side: Color) -> Selection {
    let target = match side {
        Color::White => scored.iter().map(|&(_, s)| s).max(),
        Color::Black => scored.iter().map(|&(_, s)| s).min(),
    };
    let candidates = scored
        .iter()
        .filter(|&&(_, s)| Some(s) == target)
        .map(|&(exec, _)| exec)
        .collect();
    Selection {
        score: target,
        candidates,
    }
}

/// Minimax score of playing `exec` from `pos`, or `None` once the budget is spent.
///
/// With `depth` 0, or when the resulting position has no replies, the score is
/// the static evaluation after `exec`. Otherwise it is the best reply score for
/// the side to move there: the maximum on White's turn, the minimum on Black's.
pub fn score_execution(
    pos: &Position,
    exec: &Execution,
    depth: u8,
    evaluator: &Evaluator,
    cache: &mut TranspositionCache,
    tc: &TimeControl,
) -> Option<i64> {
    let key = CacheKey {
        state: pos.state_key(),
        execution: *exec,
        depth,
    };
    if let Some(score) = cache.get(&key) {
        return Some(score);
    }
    if tc.count_node() {
        return None;
    }

    let next = pos.simulate(exec);
    let replies = if depth == 0 {
        Vec::new()
    } else {
        side_legal_executions(&next)
    };

    let score = if replies.is_empty() {
        evaluator.evaluate(&next)
    } else {
        let maximize = next.side_to_move == Color::White;
        let mut best = if maximize { i64::MIN } else { i64::MAX };
        for reply in &replies {
            let s = score_execution(&next, reply, depth - 1, evaluator, cache, tc)?;
            best = if maximize { best.max(s) } else { best.min(s) };
        }
        best
    };

    cache.insert(key, score);
    Some(score)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
