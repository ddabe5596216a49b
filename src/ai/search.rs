use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use crate::ai::eval::evaluate_with;
use crate::ai::tuning::{TuningRow, TuningTable};
use crate::error::TuningError;
use crate::game::{GameState, MAX_TURN};
use crate::logging::Logger;
use crate::types::{Color, Token};

const DEFAULT_DEPTH: u32 = 4;
const DEFAULT_TIMEOUT_MS: u64 = 1000;
const MIN_SCORE: f64 = f64::NEG_INFINITY;
const MAX_SCORE: f64 = f64::INFINITY;

/// Inputs of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub depth: u32,
    pub alpha: f64,
    pub beta: f64,
    pub time_budget: Duration,
}

impl SearchParams {
    pub fn from_row(row: &TuningRow, time_budget: Duration) -> Self {
        Self {
            depth: row.depth,
            alpha: row.alpha,
            beta: row.beta,
            time_budget,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            alpha: MIN_SCORE,
            beta: MAX_SCORE,
            time_budget: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// How expansion of a node ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Depth exhausted or the side to move had no legal move.
    Leaf,
    /// Every child was explored.
    Exhausted,
    /// Stopped on `beta <= alpha`.
    Pruned,
    /// Stopped because the time budget ran out.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Scored {
    score: f64,
    status: NodeStatus,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeStats {
    nodes: u64,
    pruned: u64,
    timed_out: u64,
}

impl NodeStats {
    fn record(&mut self, status: NodeStatus) {
        match status {
            NodeStatus::Pruned => self.pruned += 1,
            NodeStatus::TimedOut => self.timed_out += 1,
            NodeStatus::Leaf | NodeStatus::Exhausted => {}
        }
    }

    fn merge(&mut self, other: NodeStats) {
        self.nodes += other.nodes;
        self.pruned += other.pruned;
        self.timed_out += other.timed_out;
    }
}

/// Shared between root workers.
#[derive(Debug, Default)]
struct Accumulator {
    candidates: Vec<(Token, f64)>,
    stats: NodeStats,
}

#[derive(Debug, Clone, Copy)]
struct Clock {
    start: Instant,
    budget: Duration,
}

impl Clock {
    fn expired(&self) -> bool {
        self.start.elapsed() >= self.budget
    }
}

/// What one search found.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub best_move: Option<Token>,
    pub score: f64,
    /// Root moves with their scores, best first.
    pub candidates: Vec<(Token, f64)>,
    pub nodes: u64,
    pub pruned: u64,
    pub timed_out: u64,
    pub elapsed: Duration,
}

/// Time-bounded alpha-beta search with a parallel root.
///
/// Ties between equally scored root moves are broken with the engine's own
/// random source, so a seeded engine is reproducible.
pub struct SearchEngine<R = StdRng> {
    logger: Logger,
    rng: R,
}

impl SearchEngine<StdRng> {
    /// Engine seeded from the clock once, at construction.
    pub fn new(logger: Logger) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(logger, seed)
    }

    pub fn seeded(logger: Logger, seed: u64) -> Self {
        Self::with_rng(logger, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(logger: Logger, rng: R) -> Self {
        Self { logger, rng }
    }

    pub fn logger(&self) -> Logger {
        self.logger
    }

    /// Move `engine` should play, or `None` when it has no legal move.
    pub fn get_best_move(
        &mut self,
        state: &GameState,
        engine: Color,
        depth: u32,
        alpha: f64,
        beta: f64,
        time_budget_ms: u64,
    ) -> Option<Token> {
        let params = SearchParams {
            depth,
            alpha,
            beta,
            time_budget: Duration::from_millis(time_budget_ms),
        };
        self.search(state, engine, &params).best_move
    }

    /// Looks up the parameters for the current turn and searches with them.
    pub fn best_move_for_turn(
        &mut self,
        state: &GameState,
        engine: Color,
        table: &TuningTable,
        difficulty: u8,
        time_budget: Duration,
    ) -> Result<Option<Token>, TuningError> {
        let turn = state.turn();
        let row = table
            .lookup(difficulty, turn)
            .ok_or(TuningError::MissingRow { difficulty, turn })?;
        let params = SearchParams::from_row(row, time_budget);
        Ok(self.search(state, engine, &params).best_move)
    }

    /// Scores every root move in parallel and picks one of the best.
    ///
    /// All workers share one deadline starting now. A worker notices it only
    /// between children, so the search may overrun by one node expansion.
    pub fn search(&mut self, state: &GameState, engine: Color, params: &SearchParams) -> SearchReport {
        let clock = Clock {
            start: Instant::now(),
            budget: params.time_budget,
        };
        let logger = self.logger;
        let moves = state.allowed_moves(engine);

        logger.info(format_args!(
            "search: {:?} at turn {}, {} moves, depth {}, budget {:?}",
            engine,
            state.turn(),
            moves.len(),
            params.depth,
            params.time_budget
        ));

        if moves.is_empty() {
            logger.info(format_args!("search: {engine:?} has no legal move"));
            return SearchReport {
                best_move: None,
                score: MIN_SCORE,
                candidates: Vec::new(),
                nodes: 0,
                pruned: 0,
                timed_out: 0,
                elapsed: clock.start.elapsed(),
            };
        }

        let shared = Mutex::new(Accumulator::default());
        let child_depth = params.depth.saturating_sub(1);

        moves.par_iter().for_each(|&mv| {
            let (child, _) = state.apply_move(mv.x, mv.y, engine);
            let mut stats = NodeStats {
                nodes: 1,
                ..NodeStats::default()
            };
            let result = alpha_beta(
                &child,
                engine,
                child_depth,
                params.alpha,
                params.beta,
                &clock,
                &mut stats,
            );
            logger.debug(format_args!(
                "search: ({}, {}) scored {:.4} ({:?}, {} nodes)",
                mv.x, mv.y, result.score, result.status, stats.nodes
            ));

            let mut acc = shared.lock();
            acc.candidates.push((mv, result.score));
            acc.stats.merge(stats);
        });

        let Accumulator {
            mut candidates,
            stats,
        } = shared.into_inner();
        candidates.sort_by(|(_, left), (_, right)| right.total_cmp(left));

        let best_score = candidates[0].1;
        let ties: Vec<Token> = candidates
            .iter()
            .take_while(|(_, score)| *score == best_score)
            .map(|&(mv, _)| mv)
            .collect();
        let best_move = ties[self.rng.random_range(0..ties.len())];

        let elapsed = clock.start.elapsed();
        logger.info(format_args!(
            "search: chose ({}, {}) score {:.4} among {} tied; {} nodes, {} pruned, {} timed out, {:?}",
            best_move.x,
            best_move.y,
            best_score,
            ties.len(),
            stats.nodes,
            stats.pruned,
            stats.timed_out,
            elapsed
        ));
        if elapsed > params.time_budget {
            logger.warn(format_args!(
                "search: overran budget {:?} by {:?}",
                params.time_budget,
                elapsed - params.time_budget
            ));
        }

        SearchReport {
            best_move: Some(best_move),
            score: best_score,
            candidates,
            nodes: stats.nodes,
            pruned: stats.pruned,
            timed_out: stats.timed_out,
            elapsed,
        }
    }
}

/// Minimax with alpha-beta pruning. The engine's color maximizes.
///
/// The side to move is taken from `node`, which already accounts for passes.
fn alpha_beta(
    node: &GameState,
    engine: Color,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    clock: &Clock,
    stats: &mut NodeStats,
) -> Scored {
    let to_move = node.current_player();
    let moves = if depth == 0 {
        Vec::new()
    } else {
        node.allowed_moves(to_move)
    };
    if moves.is_empty() {
        let can_move = depth == 0 && node.is_valid_player(to_move);
        let game_over = node.turn() >= MAX_TURN
            || (!can_move && !node.is_valid_player(to_move.opponent()));
        return Scored {
            score: evaluate_with(node, engine, game_over),
            status: NodeStatus::Leaf,
        };
    }

    let maximizing = to_move == engine;
    let mut best = if maximizing { MIN_SCORE } else { MAX_SCORE };
    let mut status = NodeStatus::Exhausted;

    for mv in moves {
        let (child, _) = node.apply_move(mv.x, mv.y, to_move);
        stats.nodes += 1;
        let score = alpha_beta(&child, engine, depth - 1, alpha, beta, clock, stats).score;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }

        if beta <= alpha {
            status = NodeStatus::Pruned;
            break;
        }
        if clock.expired() {
            status = NodeStatus::TimedOut;
            break;
        }
    }

    stats.record(status);
    Scored { score: best, status }
}
