use super::{RootResult, SearchStrategy, Searcher, INFINITY};
use crate::{board::Side, config::Strategy};

/// Plain minimax: player one maximizes, player two minimizes
pub struct Minimax;

impl Searcher<'_> {
    /// Returns the value of the current node from player one's point of view
    pub(crate) fn minimax(&mut self, depth: u32) -> i32 {
        self.nodes += 1;

        let side = self.position.side();
        if let Some(value) = self.leaf_value(depth) {
            return value * side.sign();
        }

        let maximizing = side == Side::PlayerOne;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for column in self.ordered_moves() {
            let row = self.position.play(column);
            let score = self.minimax(depth - 1);
            self.position.undo(column, row);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl SearchStrategy for Minimax {
    fn kind(&self) -> Strategy {
        Strategy::Minimax
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        // convert to the point of view of the side that just moved into the child
        searcher.root_with(depth, -INFINITY, INFINITY, |s, depth, _, _| {
            s.minimax(depth) * s.position.side().sign()
        })
    }
}
