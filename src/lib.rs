//! A depth-limited game tree search engine for the board game 'Connect 4'
//!
//! The engine scores positions with a windowed heuristic and searches them
//! with one of several interchangeable strategies (minimax, negamax, alpha-beta,
//! NegaScout, MTD(f), aspiration windows), all sharing a single board,
//! evaluator, Zobrist-keyed transposition table and move orderer.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_search::{BoardState, Engine, EngineConfig, Move, Side};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = BoardState::from_moves("112233")?;
//! let mut engine = Engine::new(EngineConfig::default())?;
//! let proposal = engine.propose_move(&mut board, Side::PlayerOne);
//!
//! assert_eq!(proposal, Some(Move { row: 0, column: 3 }));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluator;

pub mod zobrist;

pub mod position;

pub mod transposition_table;

pub mod move_order;

pub mod config;

pub mod search;

pub mod engine;

pub mod arena;

mod test;

pub use board::{BoardState, Cell, Side};
pub use config::{EngineConfig, Strategy};
pub use engine::{Engine, Move};
pub use error::{BoardError, ConfigError};
pub use evaluator::{EvalWeights, Evaluator, WIN_SCORE};
pub use move_order::MoveOrdering;

/// The width of the default game board in tiles
pub const WIDTH: usize = 7;

/// The height of the default game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

/// The largest board dimension accepted at runtime
pub const MAX_DIMENSION: usize = 16;

// the default board must be able to hold an alignment in every direction
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
const_assert!(WIDTH <= MAX_DIMENSION && HEIGHT <= MAX_DIMENSION);
