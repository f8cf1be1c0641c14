//! Static evaluation of Connect 4 positions
//!
//! Every line of [`CONNECT`] consecutive cells (horizontal, vertical and both
//! diagonals) is a window. A window holding tokens of both players can never
//! become an alignment and is ignored; a window held by one player alone scores
//! for that player according to how many of its cells are taken.

use serde::{Deserialize, Serialize};

use crate::{board::BoardState, board::Cell, error::ConfigError, CONNECT};

/// The score of a completed alignment, from the point of view of its owner
pub const WIN_SCORE: i32 = 1_000_000;

/// Heuristic weights of a window by number of tokens owned, plus the bonus for
/// each token in the center column
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub single: i32,
    pub double: i32,
    pub triple: i32,
    pub center: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            single: 1,
            double: 3,
            triple: 6,
            center: 3,
        }
    }
}

impl EvalWeights {
    fn for_count(&self, count: usize) -> i32 {
        match count {
            1 => self.single,
            2 => self.double,
            3 => self.triple,
            _ => 0,
        }
    }

    /// Checks the weights are strictly increasing and can never add up to a
    /// decisive score on a `rows` x `cols` board
    pub fn validate(&self, rows: usize, cols: usize) -> Result<(), ConfigError> {
        if !(0 < self.single && self.single < self.double && self.double < self.triple) {
            return Err(ConfigError::InvalidWeights(format!(
                "window weights must satisfy 0 < single < double < triple, got {}, {}, {}",
                self.single, self.double, self.triple
            )));
        }
        if self.center < 0 {
            return Err(ConfigError::InvalidWeights(format!(
                "center bonus must not be negative, got {}",
                self.center
            )));
        }
        let bound = self.max_heuristic(rows, cols);
        if bound >= WIN_SCORE as i64 {
            return Err(ConfigError::InvalidWeights(format!(
                "heuristic can reach {} which is not below the win score {}",
                bound, WIN_SCORE
            )));
        }
        Ok(())
    }

    /// Upper bound on the absolute value of any non-decisive evaluation
    pub fn max_heuristic(&self, rows: usize, cols: usize) -> i64 {
        window_count(rows, cols) as i64 * self.triple as i64 + rows as i64 * self.center as i64
    }
}

/// The number of windows on a `rows` x `cols` board
pub fn window_count(rows: usize, cols: usize) -> usize {
    let span_cols = (cols + 1).saturating_sub(CONNECT);
    let span_rows = (rows + 1).saturating_sub(CONNECT);
    rows * span_cols + cols * span_rows + 2 * span_rows * span_cols
}

/// Scores boards of one fixed size from player one's point of view
#[derive(Clone, Debug)]
pub struct Evaluator {
    rows: usize,
    cols: usize,
    weights: EvalWeights,
    // cell indices of every window on the board
    windows: Vec<[usize; CONNECT]>,
}

impl Evaluator {
    pub fn new(rows: usize, cols: usize, weights: EvalWeights) -> Self {
        let mut windows = Vec::with_capacity(window_count(rows, cols));
        let index = |row: usize, column: usize| column + cols * row;
        let span_cols = (cols + 1).saturating_sub(CONNECT);
        let span_rows = (rows + 1).saturating_sub(CONNECT);

        // horizontal
        for row in 0..rows {
            for column in 0..span_cols {
                windows.push(std::array::from_fn(|k| index(row, column + k)));
            }
        }
        // vertical
        for column in 0..cols {
            for row in 0..span_rows {
                windows.push(std::array::from_fn(|k| index(row + k, column)));
            }
        }
        // diagonal /
        for row in 0..span_rows {
            for column in 0..span_cols {
                windows.push(std::array::from_fn(|k| index(row + k, column + k)));
            }
        }
        // diagonal \
        for row in CONNECT - 1..rows {
            for column in 0..span_cols {
                windows.push(std::array::from_fn(|k| index(row - k, column + k)));
            }
        }

        Self {
            rows,
            cols,
            weights,
            windows,
        }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Scores `board` from player one's point of view
    ///
    /// Returns exactly `WIN_SCORE` (or `-WIN_SCORE`) as soon as a completed
    /// alignment is found, otherwise a heuristic strictly between the two.
    pub fn evaluate(&self, board: &BoardState) -> i32 {
        debug_assert!(
            board.rows() == self.rows && board.cols() == self.cols,
            "evaluator built for {}x{} used on a {}x{} board",
            self.rows,
            self.cols,
            board.rows(),
            board.cols()
        );
        let cells = board.cells();
        let mut score = 0;

        for window in self.windows.iter() {
            let (mut one, mut two) = (0, 0);
            for &idx in window.iter() {
                match cells[idx] {
                    Cell::PlayerOne => one += 1,
                    Cell::PlayerTwo => two += 1,
                    Cell::Empty => {}
                }
            }
            match (one, two) {
                (CONNECT, _) => return WIN_SCORE,
                (_, CONNECT) => return -WIN_SCORE,
                (count, 0) => score += self.weights.for_count(count),
                (0, count) => score -= self.weights.for_count(count),
                // blocked window
                _ => {}
            }
        }

        let center = self.cols / 2;
        for row in 0..self.rows {
            score += self.weights.center * cells[center + self.cols * row].value() as i32;
        }

        score
    }

    /// Whether `score` signals a completed alignment rather than a heuristic
    pub fn is_decisive(score: i32) -> bool {
        score.abs() >= WIN_SCORE
    }
}
