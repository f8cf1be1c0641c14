//! Zobrist keys for incremental position hashing
//!
//! The hash of a position is the XOR of one key per occupied (cell, player)
//! pair, plus a side key when player two is to move. Since XOR is its own
//! inverse, playing and undoing a move update the hash with the same key.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{BoardState, Cell, Side};

/// Random keys for every (cell, player) pair of one board size
///
/// Generated once when an engine is built and never modified afterwards, so
/// hashes stay comparable across every search that engine performs.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    cells: usize,
    // keys[cell * 2 + side index]
    keys: Vec<u64>,
    side_to_move: u64,
}

impl ZobristTable {
    pub fn new(rows: usize, cols: usize, seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let cells = rows * cols;
        let keys = (0..cells * 2).map(|_| rng.random::<u64>()).collect();

        Self {
            cells,
            keys,
            side_to_move: rng.random(),
        }
    }

    /// The key toggled when `side` places or removes a token at cell `index`
    pub fn key(&self, index: usize, side: Side) -> u64 {
        self.keys[index * 2 + side.index()]
    }

    /// The key toggled every time the side to move changes
    pub fn side_key(&self) -> u64 {
        self.side_to_move
    }

    /// Computes the full hash of `board` with `side` to move
    ///
    /// Only used to seed the running hash at the root of a search, the search
    /// itself updates it one move at a time.
    pub fn hash(&self, board: &BoardState, side: Side) -> u64 {
        debug_assert_eq!(board.rows() * board.cols(), self.cells);
        let mut hash = 0;
        for (idx, cell) in board.cells().iter().enumerate() {
            match cell {
                Cell::PlayerOne => hash ^= self.key(idx, Side::PlayerOne),
                Cell::PlayerTwo => hash ^= self.key(idx, Side::PlayerTwo),
                Cell::Empty => {}
            }
        }
        if side == Side::PlayerTwo {
            hash ^= self.side_to_move;
        }
        hash
    }
}
