use crate::{
    board::{BoardState, Side},
    zobrist::ZobristTable,
};

/// A board borrowed for the duration of one search, together with the side
/// to move and the running Zobrist hash
///
/// Every [`play`](Self::play) must be matched by an [`undo`](Self::undo) of the
/// same cell before the enclosing call returns, so the borrowed board is left
/// exactly as it was found.
pub struct Position<'a> {
    board: &'a mut BoardState,
    keys: &'a ZobristTable,
    side: Side,
    hash: u64,
}

impl<'a> Position<'a> {
    pub fn new(board: &'a mut BoardState, keys: &'a ZobristTable, side: Side) -> Self {
        let hash = keys.hash(board, side);
        Self {
            board,
            keys,
            side,
            hash,
        }
    }

    pub fn board(&self) -> &BoardState {
        &*self.board
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn can_play(&self, column: usize) -> bool {
        self.board.can_play(column)
    }

    /// Plays the side to move into `column`, which must be playable, and hands
    /// the move to the opponent. Returns the row the token landed on.
    pub fn play(&mut self, column: usize) -> usize {
        let row = self.board.drop_token(column, self.side);
        self.hash ^= self.keys.key(self.board.index(row, column), self.side) ^ self.keys.side_key();
        self.side = self.side.opponent();
        row
    }

    /// Reverts the most recent [`play`](Self::play)
    pub fn undo(&mut self, column: usize, row: usize) {
        self.side = self.side.opponent();
        self.board.lift_token(column, row);
        self.hash ^= self.keys.key(self.board.index(row, column), self.side) ^ self.keys.side_key();
    }
}
