//! An agent choosing moves in Connect 4 positions

use log::debug;

use crate::{
    board::{BoardState, Side},
    config::{EngineConfig, Strategy},
    error::ConfigError,
    evaluator::{Evaluator, WIN_SCORE},
    move_order::MoveOrderer,
    position::Position,
    search::{build_strategy, SearchStrategy, Searcher},
    transposition_table::TranspositionTable,
    zobrist::ZobristTable,
};

/// A proposed move: the column to play and the row the token will land on
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

/// An agent choosing moves with a depth-limited game tree search
///
/// # Notes
/// The Zobrist keys and the transposition table are built once, when the
/// engine is created, and reused by every search it performs. Only one search
/// runs at a time: [`propose_move`](Self::propose_move) borrows the board
/// mutably, plays and undoes moves on it in place, and hands it back unchanged.
///
/// # Position Scoring
/// Scores are from the point of view of the side to move. A forced alignment
/// found `n` plies ahead scores `WIN_SCORE + max_search_depth - n` for the
/// winner (negated for the loser), anything else is a heuristic estimate
/// well below `WIN_SCORE` in absolute value.
pub struct Engine {
    config: EngineConfig,
    evaluator: Evaluator,
    zobrist: ZobristTable,
    transposition_table: TranspositionTable,
    orderer: MoveOrderer,
    strategy: Box<dyn SearchStrategy>,
    last_score: Option<i32>,

    /// The number of nodes searched by this `Engine` so far (for diagnostics only)
    pub node_count: u64,
}

impl Engine {
    /// Creates an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            evaluator: Evaluator::new(config.rows, config.cols, config.weights),
            zobrist: ZobristTable::new(config.rows, config.cols, config.zobrist_seed),
            transposition_table: TranspositionTable::new(config.transposition_table_capacity),
            orderer: MoveOrderer::new(config.cols, config.move_ordering),
            strategy: build_strategy(&config),
            last_score: None,
            node_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy.kind()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.transposition_table
    }

    /// The score of the most recent search, see [Position Scoring]
    ///
    /// [Position Scoring]: #position-scoring
    pub fn last_score(&self) -> Option<i32> {
        self.last_score
    }

    /// Chooses a move for `side` on `board`
    ///
    /// Returns `None` when there is nothing to play: the board is full or
    /// already holds a completed alignment. The board is left unchanged.
    ///
    /// # Panics
    /// Panics if the board dimensions differ from the configured ones.
    pub fn propose_move(&mut self, board: &mut BoardState, side: Side) -> Option<Move> {
        self.analyse(board, side).map(|(_, proposal)| proposal)
    }

    /// Like [`propose_move`](Self::propose_move), also returning the score of the position
    pub fn analyse(&mut self, board: &mut BoardState, side: Side) -> Option<(i32, Move)> {
        assert!(
            board.rows() == self.config.rows && board.cols() == self.config.cols,
            "engine configured for a {}x{} board was given a {}x{} board",
            self.config.rows,
            self.config.cols,
            board.rows(),
            board.cols()
        );

        if board.is_full() {
            debug!("no legal move, the board is full");
            return None;
        }
        if Evaluator::is_decisive(self.evaluator.evaluate(board)) {
            debug!("no move, the game is already decided");
            return None;
        }

        let depth = self.config.max_search_depth;

        // a move completing an alignment needs no search
        if let Some(&column) = self
            .orderer
            .center_out()
            .iter()
            .find(|&&column| board.is_winning_move(column, side))
        {
            let score = WIN_SCORE + depth as i32 - 1;
            let proposal = Move {
                row: board.height(column),
                column,
            };
            debug!("{:?} wins immediately in column {}", side, column);
            self.last_score = Some(score);
            return Some((score, proposal));
        }

        let mut searcher = Searcher::new(
            Position::new(board, &self.zobrist, side),
            &self.evaluator,
            &self.orderer,
            &mut self.transposition_table,
        );
        let result = self.strategy.search_root(&mut searcher, depth);
        let nodes = searcher.nodes();
        self.node_count += nodes;

        let column = result.column?;
        debug!(
            "{} search for {:?} at depth {}: score {}, column {}, {} nodes",
            self.strategy.kind(),
            side,
            depth,
            result.score,
            column,
            nodes
        );
        self.last_score = Some(result.score);
        Some((
            result.score,
            Move {
                row: board.height(column),
                column,
            },
        ))
    }

    /// Converts a decisive score to the number of plies until the alignment,
    /// counting the move about to be played, or `None` for a heuristic score
    pub fn score_to_win_distance(&self, score: i32) -> Option<u32> {
        if !Evaluator::is_decisive(score) {
            return None;
        }
        let remaining = (score.abs() - WIN_SCORE) as u32;
        Some(self.config.max_search_depth.saturating_sub(remaining).max(1))
    }
}
