use super::{bound_for, RootResult, SearchStrategy, Searcher, INFINITY};
use crate::{config::Strategy, transposition_table::Bound};

/// Negamax with alpha-beta pruning and transposition table cutoffs
pub struct AlphaBeta;

impl Searcher<'_> {
    /// Fail-soft alpha-beta search of the current node
    ///
    /// The result is exact when it lies strictly inside (`alpha`, `beta`), an
    /// upper bound when at or below `alpha` and a lower bound when at or above
    /// `beta`.
    pub(crate) fn alpha_beta(&mut self, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        // try to fetch a usable score or tighter bounds from the transposition table
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
        for column in self.ordered_moves() {
            let row = self.position.play(column);
            let score = -self.alpha_beta(depth - 1, -beta, -a);
            self.position.undo(column, row);

            if score > best {
                best = score;
            }
            if best > a {
                a = best;
            }
            // a perfect opponent will not let the game reach this node
            if a >= beta {
                break;
            }
        }

        self.table.set(key, depth, best, bound_for(best, alpha, beta));
        best
    }
}

impl SearchStrategy for AlphaBeta {
    fn kind(&self) -> Strategy {
        Strategy::AlphaBeta
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        searcher.root_with(depth, -INFINITY, INFINITY, |s, depth, alpha, beta| {
            s.alpha_beta(depth, alpha, beta)
        })
    }
}
