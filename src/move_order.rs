//! Column visitation order for the searches
//!
//! Ordering only changes how early the searches can prune, never the score
//! they return.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{evaluator::Evaluator, position::Position, MAX_DIMENSION};

/// The columns of one node, in the order they should be searched
pub type MoveList = SmallVec<[usize; MAX_DIMENSION]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOrdering {
    /// center columns first, moving outwards
    Static,
    /// best static evaluation after the move first, center-out among equals
    Dynamic,
}

impl Default for MoveOrdering {
    fn default() -> Self {
        MoveOrdering::Static
    }
}

/// Returns the columns of a `cols` wide board ordered from the middle outwards,
/// as the middle columns are often better moves
///
/// Columns are sorted by distance from column `cols / 2`, the lower index first
/// among columns at the same distance.
pub fn center_out_order(cols: usize) -> Vec<usize> {
    let center = cols / 2;
    let mut order: Vec<usize> = (0..cols).collect();
    order.sort_by_key(|&column| (column.abs_diff(center), column));
    order
}

struct MoveSorter {
    // column and score
    moves: SmallVec<[(usize, i32); MAX_DIMENSION]>,
}

impl MoveSorter {
    pub fn new() -> Self {
        Self {
            moves: SmallVec::new(),
        }
    }

    pub fn push(&mut self, column: usize, score: i32) {
        let mut pos = self.moves.len();
        self.moves.push((column, score));
        while pos != 0 && self.moves[pos - 1].1 > score {
            self.moves[pos] = self.moves[pos - 1];
            pos -= 1;
        }
        self.moves[pos] = (column, score);
    }
}

impl Iterator for MoveSorter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.moves.pop().map(|(column, _)| column)
    }
}

#[derive(Clone, Debug)]
pub struct MoveOrderer {
    ordering: MoveOrdering,
    center_out: Vec<usize>,
}

impl MoveOrderer {
    pub fn new(cols: usize, ordering: MoveOrdering) -> Self {
        Self {
            ordering,
            center_out: center_out_order(cols),
        }
    }

    pub fn ordering(&self) -> MoveOrdering {
        self.ordering
    }

    /// Every column of the board, center first
    pub fn center_out(&self) -> &[usize] {
        &self.center_out
    }

    /// The playable columns of `position` in search order
    ///
    /// Dynamic ordering plays each candidate, scores it for the side making the
    /// move and undoes it again, leaving `position` unchanged.
    pub fn order(&self, position: &mut Position, evaluator: &Evaluator) -> MoveList {
        match self.ordering {
            MoveOrdering::Static => self
                .center_out
                .iter()
                .copied()
                .filter(|&column| position.can_play(column))
                .collect(),
            MoveOrdering::Dynamic => {
                let mover = position.side();
                let mut moves = MoveSorter::new();
                // pushing the edges first keeps center-out order among equal scores
                for &column in self.center_out.iter().rev() {
                    if !position.can_play(column) {
                        continue;
                    }
                    let row = position.play(column);
                    let score = evaluator.evaluate(position.board()) * mover.sign();
                    position.undo(column, row);
                    moves.push(column, score);
                }
                moves.collect()
            }
        }
    }
}
