//! Fixed-depth minimax with alpha-beta pruning.
//!
//! White plies maximise and black plies minimise a white-relative score. Each
//! call is self-contained: the root position is only read, every explored
//! future is a fresh copy produced by the executor, and nothing is shared
//! between calls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::game_state::chess_rules::DEFAULT_SEARCH_DEPTH;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves_with_states;
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MaterialMobilityScorer, Score, MATE_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search. Zero is searched as one ply so a move is still chosen.
    pub depth: u8,
    /// Worker threads for splitting root moves; `0` and `1` search inline.
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            threads: 1,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Cooperative cancellation, polled at every node.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub deadline: Option<Instant>,
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn with_movetime(movetime: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + movetime),
            stop: None,
        }
    }

    pub fn with_stop_flag(stop: Arc<AtomicBool>) -> Self {
        Self {
            deadline: None,
            stop: Some(stop),
        }
    }

    #[inline]
    fn should_stop(&self) -> bool {
        if self
            .stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: Score,
    pub nodes: u64,
    /// False when the limits cut the search short. The best move then comes
    /// from the root moves that were fully searched.
    pub completed: bool,
}

/// Best move for the side to move at `depth` plies with the default
/// evaluator, or `None` when there is no legal move.
pub fn choose_move(game_state: &GameState, depth: u8) -> Option<Move> {
    search(
        game_state,
        &MaterialMobilityScorer::default(),
        SearchConfig::with_depth(depth),
        &SearchLimits::default(),
    )
    .best_move
}

pub fn search<S: BoardScorer>(
    game_state: &GameState,
    scorer: &S,
    config: SearchConfig,
    limits: &SearchLimits,
) -> SearchResult {
    let started = Instant::now();
    let root_moves = generate_legal_moves_with_states(game_state, game_state.side_to_move);
    if root_moves.is_empty() {
        return SearchResult {
            best_move: None,
            best_score: terminal_score(game_state),
            nodes: 1,
            completed: true,
        };
    }

    let depth = config.depth.max(1);
    let maximizing = game_state.side_to_move == Color::White;

    let outcome = if config.threads > 1 && root_moves.len() > 1 {
        search_root_parallel(&root_moves, depth, maximizing, scorer, limits, config.threads)
    } else {
        search_root(&root_moves, depth, maximizing, scorer, limits)
    };

    // Nothing finished before the limits hit: fall back to the first move.
    let (best_move, best_score) = match outcome.best {
        Some((mv, score)) => (mv, score),
        None => (root_moves[0].mv, scorer.score(&root_moves[0].game_after_move)),
    };

    debug!(
        "search depth {} best {} score {:.1} nodes {} completed {} in {:?}",
        depth,
        best_move,
        best_score,
        outcome.nodes,
        !outcome.aborted,
        started.elapsed()
    );

    SearchResult {
        best_move: Some(best_move),
        best_score,
        nodes: outcome.nodes,
        completed: !outcome.aborted,
    }
}

struct RootOutcome {
    best: Option<(Move, Score)>,
    nodes: u64,
    aborted: bool,
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    limits: &'a SearchLimits,
    nodes: u64,
    aborted: bool,
}

impl<'a, S: BoardScorer> SearchContext<'a, S> {
    fn new(scorer: &'a S, limits: &'a SearchLimits) -> Self {
        Self {
            scorer,
            limits,
            nodes: 0,
            aborted: false,
        }
    }
}

/// First strictly better score wins, so ties keep generation order.
#[inline]
fn improves(maximizing: bool, score: Score, best: Option<(Move, Score)>) -> bool {
    match best {
        None => true,
        Some((_, best_score)) if maximizing => score > best_score,
        Some((_, best_score)) => score < best_score,
    }
}

fn search_root<S: BoardScorer>(
    root_moves: &[GeneratedMove],
    depth: u8,
    maximizing: bool,
    scorer: &S,
    limits: &SearchLimits,
) -> RootOutcome {
    let mut ctx = SearchContext::new(scorer, limits);
    let mut alpha = Score::NEG_INFINITY;
    let mut beta = Score::INFINITY;
    let mut best = None;

    for generated in root_moves {
        let score = alpha_beta(&generated.game_after_move, depth - 1, alpha, beta, &mut ctx);
        if ctx.aborted {
            break;
        }
        trace!("root {} score {:.1}", generated.mv, score);

        if improves(maximizing, score, best) {
            best = Some((generated.mv, score));
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    RootOutcome {
        best,
        nodes: ctx.nodes,
        aborted: ctx.aborted,
    }
}

/// Root moves are dealt round-robin to scoped workers and searched with a full
/// window, so every root score is exact. Reducing in generation order then
/// picks the same move as the sequential search.
fn search_root_parallel<S: BoardScorer>(
    root_moves: &[GeneratedMove],
    depth: u8,
    maximizing: bool,
    scorer: &S,
    limits: &SearchLimits,
    threads: usize,
) -> RootOutcome {
    let workers = threads.min(root_moves.len());
    let mut scores: Vec<Option<Score>> = vec![None; root_moves.len()];
    let mut nodes = 0u64;
    let mut aborted = false;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let mut ctx = SearchContext::new(scorer, limits);
                    let mut local = Vec::new();
                    for (index, generated) in root_moves.iter().enumerate().skip(worker).step_by(workers) {
                        let score = alpha_beta(
                            &generated.game_after_move,
                            depth - 1,
                            Score::NEG_INFINITY,
                            Score::INFINITY,
                            &mut ctx,
                        );
                        if ctx.aborted {
                            break;
                        }
                        local.push((index, score));
                    }
                    (local, ctx.nodes, ctx.aborted)
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok((local, worker_nodes, worker_aborted)) => {
                    for (index, score) in local {
                        scores[index] = Some(score);
                    }
                    nodes += worker_nodes;
                    aborted |= worker_aborted;
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    let mut best = None;
    for (generated, score) in root_moves.iter().zip(scores) {
        if let Some(score) = score {
            if improves(maximizing, score, best) {
                best = Some((generated.mv, score));
            }
        }
    }

    RootOutcome {
        best,
        nodes,
        aborted,
    }
}

fn alpha_beta<S: BoardScorer>(
    game_state: &GameState,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    ctx: &mut SearchContext<'_, S>,
) -> Score {
    ctx.nodes += 1;
    if ctx.limits.should_stop() {
        ctx.aborted = true;
        return 0.0;
    }

    if depth == 0 {
        return ctx.scorer.score(game_state);
    }

    let moves = generate_legal_moves_with_states(game_state, game_state.side_to_move);
    if moves.is_empty() {
        return terminal_score(game_state);
    }

    if game_state.side_to_move == Color::White {
        let mut best = Score::NEG_INFINITY;
        for generated in moves {
            let score = alpha_beta(&generated.game_after_move, depth - 1, alpha, beta, ctx);
            if ctx.aborted {
                return best;
            }
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = Score::INFINITY;
        for generated in moves {
            let score = alpha_beta(&generated.game_after_move, depth - 1, alpha, beta, ctx);
            if ctx.aborted {
                return best;
            }
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Score of a position with no legal moves: mate against the side to move,
/// or a stalemate draw.
fn terminal_score(game_state: &GameState) -> Score {
    let mover = game_state.side_to_move;
    if !in_check(game_state, mover) {
        return 0.0;
    }
    match mover {
        Color::White => -MATE_SCORE,
        Color::Black => MATE_SCORE,
    }
}
