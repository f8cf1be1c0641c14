//! The game tree searches
//!
//! Every strategy explores the tree depth first on one shared [`Position`],
//! playing and undoing moves in place. Node values are always from the point
//! of view of the side to move at that node and are negated on the way back up.
//!
//! # Scores
//! A node holding a completed alignment with `d` plies of search left scores
//! `WIN_SCORE + d` for the owner of the alignment (negated for the other side),
//! so nearer wins are preferred. Any other leaf scores its static evaluation.

use crate::{
    config::{EngineConfig, Strategy},
    evaluator::{Evaluator, WIN_SCORE},
    move_order::{MoveList, MoveOrderer},
    position::Position,
    transposition_table::{Bound, TranspositionTable},
};

mod alpha_beta;
mod aspiration;
mod minimax;
mod mtdf;
mod negamax;
mod negascout;

pub use alpha_beta::AlphaBeta;
pub use aspiration::Aspiration;
pub use minimax::Minimax;
pub use mtdf::Mtdf;
pub use negamax::Negamax;
pub use negascout::NegaScout;

/// A bound beyond any reachable score, the edges of the open window
pub const INFINITY: i32 = 2 * WIN_SCORE;

/// The outcome of a root search: its score for the side to move and the
/// column that achieved it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RootResult {
    pub score: i32,
    pub column: Option<usize>,
}

/// A game tree search algorithm
///
/// Implementations may keep state between searches, such as the score of the
/// previous search as a first guess.
pub trait SearchStrategy {
    fn kind(&self) -> Strategy;

    /// Searches `depth` plies from the root of `searcher`, which has at least
    /// one playable column and no completed alignment, `depth` is at least 1
    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult;
}

/// Builds the strategy selected by `config`
pub fn build_strategy(config: &EngineConfig) -> Box<dyn SearchStrategy> {
    match config.strategy {
        Strategy::Minimax => Box::new(Minimax),
        Strategy::Negamax => Box::new(Negamax),
        Strategy::AlphaBeta => Box::new(AlphaBeta),
        Strategy::NegaScout => Box::new(NegaScout),
        Strategy::Mtdf => Box::new(Mtdf::new()),
        Strategy::Aspiration => Box::new(Aspiration::new(
            config.aspiration_window_width,
            config.aspiration_max_retries,
        )),
    }
}

/// The state shared by every node of one search
pub struct Searcher<'a> {
    position: Position<'a>,
    evaluator: &'a Evaluator,
    orderer: &'a MoveOrderer,
    table: &'a mut TranspositionTable,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(
        position: Position<'a>,
        evaluator: &'a Evaluator,
        orderer: &'a MoveOrderer,
        table: &'a mut TranspositionTable,
    ) -> Self {
        Self {
            position,
            evaluator,
            orderer,
            table,
            nodes: 0,
        }
    }

    /// The number of nodes visited so far
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn position(&self) -> &Position<'a> {
        &self.position
    }

    fn ordered_moves(&mut self) -> MoveList {
        self.orderer.order(&mut self.position, self.evaluator)
    }

    /// The value of the current node if the search stops here
    fn leaf_value(&self, depth: u32) -> Option<i32> {
        let score = self.evaluator.evaluate(self.position.board()) * self.position.side().sign();
        if Evaluator::is_decisive(score) {
            return Some(score.signum() * (WIN_SCORE + depth as i32));
        }
        if depth == 0 || self.position.board().is_full() {
            return Some(score);
        }
        None
    }

    /// Searches every root move with `child`, which returns the value of the
    /// position after the move from the opponent's point of view
    ///
    /// Stops at the first move reaching `beta`. The returned score is exact if
    /// it falls strictly inside (`alpha`, `beta`), otherwise it is a bound on
    /// the side it fell.
    fn root_with<F>(&mut self, depth: u32, mut alpha: i32, beta: i32, mut child: F) -> RootResult
    where
        F: FnMut(&mut Self, u32, i32, i32) -> i32,
    {
        self.nodes += 1;

        let mut best = RootResult {
            score: -INFINITY,
            column: None,
        };
        for column in self.ordered_moves() {
            let row = self.position.play(column);
            // the search window is flipped for the other player
            let score = -child(self, depth - 1, -beta, -alpha);
            self.position.undo(column, row);

            if best.column.is_none() || score > best.score {
                best = RootResult {
                    score,
                    column: Some(column),
                };
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Classifies a fail-soft result searched in the window (`alpha`, `beta`)
fn bound_for(score: i32, alpha: i32, beta: i32) -> Bound {
    if score <= alpha {
        Bound::UpperBound
    } else if score >= beta {
        Bound::LowerBound
    } else {
        Bound::Exact
    }
}
