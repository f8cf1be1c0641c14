//! Error types for board manipulation and engine configuration

use thiserror::Error;

/// Errors raised by misuse of a [`BoardState`](crate::board::BoardState)
///
/// All of these indicate a caller bug: the search itself never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("column {column} out of range, the board has {width} columns")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("undo of ({column}, {row}) does not match the most recent play {expected:?}")]
    InconsistentUndo {
        column: usize,
        row: usize,
        expected: Option<(usize, usize)>,
    },

    #[error("invalid board dimensions {rows}x{cols}, each must be between 1 and {max}")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },

    #[error("could not parse '{0}' as a valid move")]
    Parse(String),

    #[error("invalid position, game is over")]
    GameOver,

    #[error("token at row {row}, column {column} is floating above an empty cell")]
    FloatingToken { row: usize, column: usize },
}

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_search_depth must be between 1 and {max}, got {depth}")]
    InvalidDepth { depth: u32, max: u32 },

    #[error("invalid evaluation weights: {0}")]
    InvalidWeights(String),

    #[error("aspiration window width must be positive")]
    InvalidAspiration,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
