use super::{bound_for, RootResult, SearchStrategy, Searcher, INFINITY};
use crate::{config::Strategy, transposition_table::Bound};

/// Principal variation search
///
/// The first move of every node is searched with the full window, the others
/// with a null window around alpha, and only re-searched with the full window
/// when the probe shows they may beat the first.
pub struct NegaScout;

impl Searcher<'_> {
    /// Searches the child reached by the move just played, probing with a null
    /// window first unless it is the first child
    fn scout_child(&mut self, depth: u32, first: bool, alpha: i32, beta: i32) -> i32 {
        if first {
            return -self.negascout(depth, -beta, -alpha);
        }
        let score = -self.negascout(depth, -alpha - 1, -alpha);
        if score > alpha && score < beta {
            -self.negascout(depth, -beta, -score)
        } else {
            score
        }
    }

    /// Fail-soft principal variation search of the current node
    pub(crate) fn negascout(&mut self, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        let key = self.position.hash();
        if let Some(score) = self.table.probe(key, depth, &mut alpha, &mut beta) {
            return score;
        }

        if let Some(value) = self.leaf_value(depth) {
            self.table.set(key, depth, value, Bound::Exact);
            return value;
        }

        let mut best = -INFINITY;
        let mut a = alpha;
        for (i, column) in self.ordered_moves().into_iter().enumerate() {
            let row = self.position.play(column);
            let score = self.scout_child(depth - 1, i == 0, a, beta);
            self.position.undo(column, row);

            if score > best {
                best = score;
            }
            if best > a {
                a = best;
            }
            if a >= beta {
                break;
            }
        }

        self.table.set(key, depth, best, bound_for(best, alpha, beta));
        best
    }
}

impl SearchStrategy for NegaScout {
    fn kind(&self) -> Strategy {
        Strategy::NegaScout
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        searcher.nodes += 1;

        let beta = INFINITY;
        let mut alpha = -INFINITY;
        let mut best = RootResult {
            score: -INFINITY,
            column: None,
        };
        for (i, column) in searcher.ordered_moves().into_iter().enumerate() {
            let row = searcher.position.play(column);
            let score = searcher.scout_child(depth - 1, i == 0, alpha, beta);
            searcher.position.undo(column, row);

            if best.column.is_none() || score > best.score {
                best = RootResult {
                    score,
                    column: Some(column),
                };
            }
            alpha = alpha.max(score);
        }
        best
    }
}
