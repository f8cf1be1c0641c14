//! Engine-versus-engine games
//!
//! A match plays a series of games between two engine configurations in
//! parallel, one fresh pair of engines per game. Who moves first alternates
//! between games and the first move of each pair of games is forced, rotating
//! through the columns, so the series does not replay the same game.

use anyhow::{anyhow, ensure, Result};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::thread;
use std::time::Instant;

use crate::{
    board::{BoardState, Side},
    config::EngineConfig,
    engine::Engine,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
}

/// A finished game: its result and every column played, zero-indexed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: Vec<usize>,
}

impl GameRecord {
    /// The moves as one-indexed column numbers
    pub fn move_string(&self) -> String {
        self.moves
            .iter()
            .map(|column| (column + 1).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Plays one game between `first` (player one) and `second` (player two),
/// with player one's first move forced to `opening` when given
pub fn play_game(
    first: &EngineConfig,
    second: &EngineConfig,
    opening: Option<usize>,
) -> Result<GameRecord> {
    ensure!(
        first.rows == second.rows && first.cols == second.cols,
        "engines configured for different boards: {}x{} and {}x{}",
        first.rows,
        first.cols,
        second.rows,
        second.cols
    );
    let mut engines = [Engine::new(first.clone())?, Engine::new(second.clone())?];
    let mut board = BoardState::with_dimensions(first.rows, first.cols)?;
    let mut side = Side::PlayerOne;
    let mut moves = Vec::new();
    let mut forced = opening;

    loop {
        if board.is_full() {
            return Ok(GameRecord {
                outcome: Outcome::Draw,
                moves,
            });
        }

        let column = match forced.take() {
            Some(column) => column,
            None => engines[side.index()]
                .propose_move(&mut board, side)
                .map(|proposal| proposal.column)
                .ok_or_else(|| anyhow!("no move proposed on a playable board:\n{}", board))?,
        };

        let wins = board.is_winning_move(column, side);
        board.play(column, side)?;
        moves.push(column);

        if wins {
            debug!("game won by {:?}:\n{}", side, board);
            let outcome = match side {
                Side::PlayerOne => Outcome::FirstPlayerWin,
                Side::PlayerTwo => Outcome::SecondPlayerWin,
            };
            return Ok(GameRecord { outcome, moves });
        }
        side = side.opponent();
    }
}

/// Results of a match, counted per configuration
#[derive(Clone, Debug, Default)]
pub struct MatchReport {
    pub first_config_wins: usize,
    pub second_config_wins: usize,
    pub draws: usize,
    /// every game in the order it was scheduled
    pub games: Vec<GameRecord>,
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} won by the first engine, {} won by the second engine, {} drawn",
            self.games.len(),
            self.first_config_wins,
            self.second_config_wins,
            self.draws
        )
    }
}

/// The game of a series with index `game`: the configurations swap sides every
/// game and the forced opening column changes every second game
fn series_game(first: &EngineConfig, second: &EngineConfig, game: usize) -> Result<GameRecord> {
    let opening = Some((game / 2) % first.cols);
    if game % 2 == 0 {
        play_game(first, second, opening)
    } else {
        play_game(second, first, opening)
    }
}

/// Plays `games` games between `first` and `second` in parallel
pub fn run_match(
    first: &EngineConfig,
    second: &EngineConfig,
    games: usize,
    show_progress: bool,
) -> Result<MatchReport> {
    let start = Instant::now();
    info!(
        "starting a {} game match: {} (depth {}) against {} (depth {})",
        games, first.strategy, first.max_search_depth, second.strategy, second.max_search_depth
    );

    let progress = if show_progress {
        let progress = ProgressBar::new(games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let (tx, rx) = channel();
    let (first_config, second_config) = (first.clone(), second.clone());
    let failed = AtomicBool::new(false);
    let worker = thread::spawn(move || {
        (0..games).into_par_iter().for_each_with(tx, |tx, game| {
            // games not yet started are skipped once one has failed
            if failed.load(Ordering::Relaxed) {
                return;
            }
            let record = series_game(&first_config, &second_config, game);
            if record.is_err() {
                failed.store(true, Ordering::Relaxed);
            }
            // the receiver is drained until every sender is dropped
            let _ = tx.send((game, record));
        });
    });

    // receive until the worker is done so it is never left running on an error
    let mut records = vec![None; games];
    let mut first_error = None;
    for (game, record) in rx.iter() {
        match record {
            Ok(record) => records[game] = Some(record),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
        progress.inc(1);
    }
    progress.finish();
    worker
        .join()
        .map_err(|_| anyhow!("arena worker thread panicked"))?;
    if let Some(err) = first_error {
        let played = progress.position();
        return Err(err.context(format!("match aborted after {} of {} games", played, games)));
    }

    let mut report = MatchReport::default();
    for (game, record) in records.into_iter().enumerate() {
        let record = record.ok_or_else(|| anyhow!("game {} was never played", game))?;
        let first_moved_first = game % 2 == 0;
        match (record.outcome, first_moved_first) {
            (Outcome::Draw, _) => report.draws += 1,
            (Outcome::FirstPlayerWin, true) | (Outcome::SecondPlayerWin, false) => {
                report.first_config_wins += 1
            }
            _ => report.second_config_wins += 1,
        }
        report.games.push(record);
    }

    info!("{} in {}", report, HumanDuration(start.elapsed()));
    Ok(report)
}
