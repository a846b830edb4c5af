use super::*;
use crate::config::Weights;
use chess_core::{MoveDescriptor, TimeControl};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

fn exec(pos: &Position, san: &str) -> Execution {
    san.parse::<MoveDescriptor>().unwrap().resolve(pos).unwrap()
}

fn context(rng: &mut StdRng, parallel: bool) -> SearchContext<'_> {
    let time_control = TimeControl::new(None, Some(20_000));
    time_control.start();
    SearchContext {
        weights: Weights::default(),
        depth: 1,
        cascade_depth: 1,
        parallel,
        cache_capacity: 4096,
        time_control,
        rng,
        completed_depth: 0,
        stopped: false,
    }
}

const BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
const BACK_RANK_THREAT: &str = "6k1/p4ppp/8/8/8/8/8/1R4K1 b - - 0 1";

#[test]
fn test_forced_mate_finds_mate_in_one() {
    let pos = fen(BACK_RANK_MATE);
    let candidates = side_legal_executions(&pos);
    for parallel in [false, true] {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = context(&mut rng, parallel);
        let selection = forced_mate(&pos, &candidates, &mut ctx);
        assert_eq!(selection.candidates, vec![exec(&pos, "Qe8")]);
        assert_eq!(selection.score, Some(MATE_SCORE));
    }
}

#[test]
fn test_forced_mate_empty_without_mate() {
    let pos = Position::startpos();
    let candidates = side_legal_executions(&pos);
    let mut rng = StdRng::seed_from_u64(0);
    let mut ctx = context(&mut rng, false);
    assert!(forced_mate(&pos, &candidates, &mut ctx).candidates.is_empty());
}

#[test]
fn test_forces_mate_next() {
    // After Rb7 the king's only move is Kg8, answered by Rb8#.
    let pos = fen("7k/8/6K1/8/8/8/8/1R6 w - - 0 1");
    assert!(forces_mate_next(&pos, &exec(&pos, "Rb7")));
    assert!(!forces_mate_next(&pos, &exec(&pos, "Kf6")));
}

#[test]
fn test_stalemating_move_is_not_a_forced_mate() {
    let pos = fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
    let stalemate = exec(&pos, "Qf7");
    assert!(pos.simulate(&stalemate).is_stalemate());
    assert!(!forces_mate_next(&pos, &stalemate));
    assert!(delivers_mate(&pos, &exec(&pos, "Qf8")));
}

#[test]
fn test_mate_avoidance_drops_moves_allowing_mate() {
    let pos = fen(BACK_RANK_THREAT);
    let candidates = side_legal_executions(&pos);
    assert_eq!(candidates.len(), 10);

    let mut rng = StdRng::seed_from_u64(0);
    let mut ctx = context(&mut rng, true);
    let kept = mate_avoidance(&pos, &candidates, &mut ctx).candidates;

    assert!(!kept.contains(&exec(&pos, "a6")));
    assert!(!kept.contains(&exec(&pos, "Kh8")));
    for defence in ["h6", "g6", "f6", "Kf8"] {
        assert!(kept.contains(&exec(&pos, defence)), "{defence}");
    }
}

#[test]
fn test_random_picks_one_candidate() {
    let pos = Position::startpos();
    let candidates = side_legal_executions(&pos);
    let mut rng = StdRng::seed_from_u64(3);
    let mut ctx = context(&mut rng, false);
    let selection = random(&pos, &candidates, &mut ctx);
    assert_eq!(selection.candidates.len(), 1);
    assert!(candidates.contains(&selection.candidates[0]));
    assert_eq!(selection.score, None);
}

#[test]
fn test_pipeline_orders() {
    let names = |mode| pipeline(mode).iter().map(|s| s.name).collect::<Vec<_>>();
    assert_eq!(
        names(EvaluationMode::Combined),
        ["forced_mate", "mate_avoidance", "weighted", "random"]
    );
    assert_eq!(
        names(EvaluationMode::Cascade),
        [
            "forced_mate",
            "mate_avoidance",
            "material",
            "king_safety",
            "development",
            "centre_control",
            "random"
        ]
    );
}

#[test]
fn test_run_pipeline_mate_decided_before_random() {
    let pos = fen(BACK_RANK_MATE);
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = context(&mut rng, false);
        let decision = run_pipeline(&pos, &pipeline(EvaluationMode::Combined), &mut ctx).unwrap();
        assert_eq!(decision.execution, exec(&pos, "Qe8"));
        assert_eq!(decision.decided_by, "forced_mate");
    }
}

#[test]
fn test_run_pipeline_ignores_empty_stage() {
    // Forced mate finds nothing at the start, so all 20 moves reach the tie-break.
    let pos = Position::startpos();
    let mut rng = StdRng::seed_from_u64(0);
    let mut ctx = context(&mut rng, false);
    let decision = run_pipeline(&pos, &[FORCED_MATE, RANDOM], &mut ctx).unwrap();
    assert_eq!(decision.decided_by, "random");
    assert_eq!(decision.score, None);
}

#[test]
fn test_run_pipeline_without_tie_break_is_exhausted() {
    let pos = Position::startpos();
    let mut rng = StdRng::seed_from_u64(0);
    let mut ctx = context(&mut rng, false);
    let err = run_pipeline(&pos, &[FORCED_MATE], &mut ctx).unwrap_err();
    assert_eq!(err, ChessError::SearchExhausted { remaining: 20 });
}

#[test]
fn test_run_pipeline_stalemate_and_single_move() {
    let pos = fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1");
    let mut rng = StdRng::seed_from_u64(0);
    let mut ctx = context(&mut rng, false);
    let decision = run_pipeline(&pos, &[FORCED_MATE], &mut ctx);
    assert_eq!(decision.unwrap_err(), ChessError::GameOver);

    // Black's king has one square left.
    let pos = fen("k7/8/1K6/8/8/8/8/2Q5 b - - 0 1");
    let decision = run_pipeline(&pos, &[], &mut ctx).unwrap();
    assert_eq!(decision.execution, exec(&pos, "Kb8"));
    assert_eq!(decision.decided_by, "only_move");
}

#[test]
fn test_has_forced_mate() {
    let pos = fen(BACK_RANK_THREAT);
    let after_a6 = pos.simulate(&exec(&pos, "a6"));
    assert!(has_forced_mate(&after_a6));
    let after_h6 = pos.simulate(&exec(&pos, "h6"));
    assert!(!has_forced_mate(&after_h6));
    assert!(!has_forced_mate(&Position::startpos()));
}
