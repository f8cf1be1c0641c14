use serde::{Deserialize, Serialize};

use std::fmt;
use std::path::Path;

use crate::{
    board::BoardState, error::ConfigError, evaluator::EvalWeights, move_order::MoveOrdering,
    HEIGHT, WIDTH,
};

/// The file the terminal front end reads its engine settings from
pub const CONFIG_PATH: &str = "connect4_config.json";

/// The game tree search algorithm an engine runs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// explicit maximizing/minimizing recursion without pruning
    Minimax,
    /// full width negamax without pruning
    Negamax,
    /// negamax with alpha-beta pruning
    AlphaBeta,
    /// principal variation search with null-window probes
    NegaScout,
    /// repeated null-window searches converging on the value
    Mtdf,
    /// alpha-beta in a narrow window around the previous score
    Aspiration,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Minimax,
        Strategy::Negamax,
        Strategy::AlphaBeta,
        Strategy::NegaScout,
        Strategy::Mtdf,
        Strategy::Aspiration,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Minimax => "minimax",
            Strategy::Negamax => "negamax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::NegaScout => "negascout",
            Strategy::Mtdf => "mtd(f)",
            Strategy::Aspiration => "aspiration",
        };
        f.write_str(name)
    }
}

/// Settings of an [`Engine`](crate::engine::Engine)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    /// plies searched below the root
    pub max_search_depth: u32,
    pub strategy: Strategy,
    pub move_ordering: MoveOrdering,
    /// half width of the first aspiration window, and how far it grows on each retry
    pub aspiration_window_width: i32,
    pub aspiration_max_retries: u32,
    /// maximum number of cached positions, 0 for no limit
    pub transposition_table_capacity: usize,
    pub zobrist_seed: u64,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: HEIGHT,
            cols: WIDTH,
            max_search_depth: 7,
            strategy: Strategy::AlphaBeta,
            move_ordering: MoveOrdering::Static,
            aspiration_window_width: 50,
            aspiration_max_retries: 4,
            transposition_table_capacity: 1 << 18,
            zobrist_seed: 0x5eed_c0de_4c4f_5534,
            weights: EvalWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Reads a configuration from a JSON file, missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::info!(
                    "using default engine configuration ({}: {})",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_depth(mut self, max_search_depth: u32) -> Self {
        self.max_search_depth = max_search_depth;
        self
    }

    pub fn with_move_ordering(mut self, move_ordering: MoveOrdering) -> Self {
        self.move_ordering = move_ordering;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // rejects zero or oversized dimensions
        BoardState::with_dimensions(self.rows, self.cols)?;

        let max_depth = (self.rows * self.cols) as u32;
        if self.max_search_depth == 0 || self.max_search_depth > max_depth {
            return Err(ConfigError::InvalidDepth {
                depth: self.max_search_depth,
                max: max_depth,
            });
        }
        if self.aspiration_window_width <= 0 {
            return Err(ConfigError::InvalidAspiration);
        }
        self.weights.validate(self.rows, self.cols)
    }
}
