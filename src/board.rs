use serde::{Deserialize, Serialize};

use std::fmt;

use crate::{error::BoardError, CONNECT, HEIGHT, MAX_DIMENSION, WIDTH};

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// `+1` for player one, `-1` for player two, used to flip scores
    /// between the two points of view
    pub fn sign(self) -> i32 {
        match self {
            Side::PlayerOne => 1,
            Side::PlayerTwo => -1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }
    }
}

/// The content of a single board cell
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Signed encoding of the cell: 0 when empty, +1 for player one, -1 for player two
    pub fn value(&self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => -1,
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Side::PlayerOne),
            Cell::PlayerTwo => Some(Side::PlayerTwo),
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::PlayerOne => Cell::PlayerOne,
            Side::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

/// A gravity-filled Connect 4 grid
///
/// # Notes
/// Rows are counted from the bottom of the board, so the row returned by
/// [`play`](Self::play) is the height of the column before the move. Moves are
/// destructive and must be reversed with [`undo`](Self::undo) in the reverse
/// order they were played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    num_moves: usize,
    // (column, row) of every move played through this board, most recent last
    history: Vec<(usize, usize)>,
}

impl BoardState {
    /// Creates an empty board of the default dimensions
    pub fn new() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            heights: vec![0; WIDTH],
            num_moves: 0,
            history: Vec::new(),
        }
    }

    /// Creates an empty board with `rows` rows and `cols` columns
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            num_moves: 0,
            history: Vec::new(),
        })
    }

    /// Builds a default-sized board from a string of one-indexed column numbers,
    /// alternating players and starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut side = Side::PlayerOne;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let column = column - 1;
                    if !board.can_play(column) {
                        return Err(BoardError::ColumnFull(column));
                    }
                    // abort if the position is won at any point
                    if board.is_winning_move(column, side) {
                        return Err(BoardError::GameOver);
                    }
                    board.drop_token(column, side);
                    side = side.opponent();
                }
                _ => return Err(BoardError::Parse(column_char.to_string())),
            }
        }
        Ok(board)
    }

    /// Builds a board from a text diagram, top row first
    ///
    /// `X` marks player one, `O` player two and `.` an empty cell. Every line
    /// must have the same length. The resulting board has no move history, so
    /// its tokens cannot be undone.
    pub fn from_rows(lines: &[&str]) -> Result<Self, BoardError> {
        let rows = lines.len();
        let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        let mut board = Self::with_dimensions(rows, cols)?;

        for (line_idx, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(BoardError::Parse(line.to_string()));
            }
            let row = rows - 1 - line_idx;
            for (column, cell_char) in line.chars().enumerate() {
                let cell = match cell_char {
                    'X' | 'x' => Cell::PlayerOne,
                    'O' | 'o' => Cell::PlayerTwo,
                    '.' => Cell::Empty,
                    other => return Err(BoardError::Parse(other.to_string())),
                };
                let idx = board.index(row, column);
                board.cells[idx] = cell;
            }
        }

        // recompute heights from the bottom, rejecting tokens above a gap
        for column in 0..cols {
            let mut height = 0;
            for row in 0..rows {
                if board.cells[board.index(row, column)].is_empty() {
                    continue;
                }
                if row != height {
                    return Err(BoardError::FloatingToken { row, column });
                }
                height += 1;
            }
            board.heights[column] = height;
            board.num_moves += height;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The number of tokens in `column`, which is also the row the next token lands on
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// Returns the content of the cell at `row` (counted from the bottom) and `column`
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn grid_value(&self, row: usize, column: usize) -> Cell {
        assert!(
            row < self.rows && column < self.cols,
            "cell ({}, {}) outside a {}x{} board",
            row,
            column,
            self.rows,
            self.cols
        );
        self.cells[self.index(row, column)]
    }

    /// Whether a token can be dropped into `column`, i.e. its top cell is empty
    pub fn can_play(&self, column: usize) -> bool {
        column < self.cols && self.cells[self.index(self.rows - 1, column)].is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.rows * self.cols
    }

    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&column| self.can_play(column))
    }

    /// Drops a token for `side` into `column`, returning the row it landed on
    pub fn play(&mut self, column: usize, side: Side) -> Result<usize, BoardError> {
        if column >= self.cols {
            return Err(BoardError::InvalidColumn {
                column,
                width: self.cols,
            });
        }
        if !self.can_play(column) {
            return Err(BoardError::ColumnFull(column));
        }
        Ok(self.drop_token(column, side))
    }

    /// Removes the token at (`column`, `row`), which must be the most recent play
    pub fn undo(&mut self, column: usize, row: usize) -> Result<(), BoardError> {
        if column >= self.cols {
            return Err(BoardError::InvalidColumn {
                column,
                width: self.cols,
            });
        }
        let expected = self.history.last().copied();
        if expected != Some((column, row)) {
            return Err(BoardError::InconsistentUndo {
                column,
                row,
                expected,
            });
        }
        self.lift_token(column, row);
        Ok(())
    }

    /// Unchecked play used on the search path, the column must be playable
    pub(crate) fn drop_token(&mut self, column: usize, side: Side) -> usize {
        debug_assert!(self.can_play(column), "play into full column {}", column);
        let row = self.heights[column];
        let idx = self.index(row, column);
        self.cells[idx] = Cell::from(side);
        self.heights[column] += 1;
        self.num_moves += 1;
        self.history.push((column, row));
        row
    }

    /// Unchecked undo used on the search path
    pub(crate) fn lift_token(&mut self, column: usize, row: usize) {
        let last = self.history.pop();
        debug_assert_eq!(
            last,
            Some((column, row)),
            "undo does not match the most recent play"
        );
        let idx = self.index(row, column);
        self.cells[idx] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
    }

    /// The side due to move, assuming player one moved first and players alternated
    pub fn side_to_move(&self) -> Side {
        let player_one = self
            .cells
            .iter()
            .filter(|&&cell| cell == Cell::PlayerOne)
            .count();
        if player_one * 2 > self.num_moves {
            Side::PlayerTwo
        } else {
            Side::PlayerOne
        }
    }

    /// Whether dropping a token for `side` into `column` completes an alignment
    pub fn is_winning_move(&self, column: usize, side: Side) -> bool {
        if !self.can_play(column) {
            return false;
        }
        let player = Cell::from(side);
        let height = self.heights[column];

        // check vertical alignment
        if height >= CONNECT - 1
            && (1..CONNECT).all(|k| self.cells[self.index(height - k, column)] == player)
        {
            return true;
        }

        // check horizontal and diagonal alignment
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = height as i32 + dx * dy_dx;
                loop {
                    if x < 0
                        || x >= self.cols as i32
                        || y < 0
                        || y >= self.rows as i32
                        || self.cells[self.index(y as usize, x as usize)] != player
                    {
                        break;
                    }
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= CONNECT - 1 {
                return true;
            }
        }

        false
    }

    /// The owner of a completed alignment on the board, if any
    pub fn winner(&self) -> Option<Side> {
        // right, up, up-right and down-right cover every line once
        const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for row in 0..self.rows {
            for column in 0..self.cols {
                let cell = self.cells[self.index(row, column)];
                let side = match cell.side() {
                    Some(side) => side,
                    None => continue,
                };
                for &(dx, dy) in DIRECTIONS.iter() {
                    let aligned = (1..CONNECT as i32).all(|k| {
                        let x = column as i32 + dx * k;
                        let y = row as i32 + dy * k;
                        x >= 0
                            && x < self.cols as i32
                            && y >= 0
                            && y < self.rows as i32
                            && self.cells[self.index(y as usize, x as usize)] == cell
                    });
                    if aligned {
                        return Some(side);
                    }
                }
            }
        }
        None
    }

    /// Returns a copy of the board with every token changing owner
    pub fn swap_sides(&self) -> Self {
        let mut swapped = self.clone();
        for cell in swapped.cells.iter_mut() {
            *cell = match cell {
                Cell::PlayerOne => Cell::PlayerTwo,
                Cell::PlayerTwo => Cell::PlayerOne,
                Cell::Empty => Cell::Empty,
            };
        }
        swapped
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn index(&self, row: usize, column: usize) -> usize {
        column + self.cols * row
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.cols {
                let symbol = match self.cells[self.index(row, column)] {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
