use log::trace;

use super::{RootResult, SearchStrategy, Searcher, INFINITY};
use crate::config::Strategy;

/// MTD(f): converges on the value of the root with a sequence of null-window
/// alpha-beta searches
///
/// Each pass only tells whether the value lies below or above its window, so
/// the passes rely on the transposition table to avoid searching the same
/// subtrees again.
pub struct Mtdf {
    // value of the previous search, the first guess of the next one
    guess: i32,
}

impl Mtdf {
    pub fn new() -> Self {
        Self { guess: 0 }
    }
}

impl Default for Mtdf {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for Mtdf {
    fn kind(&self) -> Strategy {
        Strategy::Mtdf
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        let mut guess = self.guess.clamp(-INFINITY + 1, INFINITY - 1);
        let mut lower = -INFINITY;
        let mut upper = INFINITY;
        let mut best_column = None;
        let mut passes = 0;

        while lower < upper {
            let beta = if guess == lower { guess + 1 } else { guess };
            let result = searcher.root_with(depth, beta - 1, beta, |s, depth, alpha, beta| {
                s.alpha_beta(depth, alpha, beta)
            });
            guess = result.score;
            passes += 1;

            if guess < beta {
                upper = guess;
            } else {
                // the move that failed high is at least as good as the lower bound
                lower = guess;
                best_column = result.column;
            }
            trace!("mtd(f) pass {}: beta {}, bounds [{}, {}]", passes, beta, lower, upper);
        }

        self.guess = guess;
        RootResult {
            score: guess,
            column: best_column.or_else(|| searcher.ordered_moves().first().copied()),
        }
    }
}
