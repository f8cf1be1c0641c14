use super::{RootResult, SearchStrategy, Searcher, INFINITY};
use crate::config::Strategy;

/// Full width negamax, the reference the pruning searches must agree with
pub struct Negamax;

impl Searcher<'_> {
    /// Returns the exact value of the current node searched `depth` plies deep
    pub(crate) fn negamax(&mut self, depth: u32) -> i32 {
        self.nodes += 1;

        if let Some(value) = self.leaf_value(depth) {
            return value;
        }

        let mut best = -INFINITY;
        for column in self.ordered_moves() {
            let row = self.position.play(column);
            let score = -self.negamax(depth - 1);
            self.position.undo(column, row);
            best = best.max(score);
        }
        best
    }
}

impl SearchStrategy for Negamax {
    fn kind(&self) -> Strategy {
        Strategy::Negamax
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        searcher.root_with(depth, -INFINITY, INFINITY, |s, depth, _, _| s.negamax(depth))
    }
}
