use log::{debug, trace};

use super::{RootResult, SearchStrategy, Searcher, INFINITY};
use crate::config::Strategy;

/// Alpha-beta search in a narrow window centered on the previous score
///
/// A search falling outside the window is repeated with the failing edge moved
/// out by the window width. Once the retries are used up the root is searched
/// with the open window.
pub struct Aspiration {
    guess: i32,
    width: i32,
    max_retries: u32,
}

impl Aspiration {
    pub fn new(width: i32, max_retries: u32) -> Self {
        Self {
            guess: 0,
            width,
            max_retries,
        }
    }

    fn search_window(searcher: &mut Searcher, depth: u32, alpha: i32, beta: i32) -> RootResult {
        searcher.root_with(depth, alpha, beta, |s, depth, alpha, beta| {
            s.alpha_beta(depth, alpha, beta)
        })
    }
}

impl SearchStrategy for Aspiration {
    fn kind(&self) -> Strategy {
        Strategy::Aspiration
    }

    fn search_root(&mut self, searcher: &mut Searcher, depth: u32) -> RootResult {
        let mut alpha = self.guess.saturating_sub(self.width).max(-INFINITY);
        let mut beta = self.guess.saturating_add(self.width).min(INFINITY);

        for attempt in 0..=self.max_retries {
            let result = Self::search_window(searcher, depth, alpha, beta);
            if result.score <= alpha {
                trace!("aspiration attempt {} failed low at {}", attempt, result.score);
                alpha = alpha.saturating_sub(self.width).max(-INFINITY);
            } else if result.score >= beta {
                trace!("aspiration attempt {} failed high at {}", attempt, result.score);
                beta = beta.saturating_add(self.width).min(INFINITY);
            } else {
                self.guess = result.score;
                return result;
            }
        }

        debug!(
            "aspiration window retries exhausted after {} attempts, searching the open window",
            self.max_retries + 1
        );
        let result = Self::search_window(searcher, depth, -INFINITY, INFINITY);
        self.guess = result.score;
        result
    }
}
