use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent, Stylize},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_search::{BoardState, Cell, Side};

#[derive(Copy, Clone, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// The authoritative game the terminal front end shows and the engines are
/// asked about
pub struct Game {
    pub board: BoardState,
    pub side: Side,
    pub state: GameState,
    pub moves: String,
}

impl Game {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            board: BoardState::with_dimensions(rows, cols)?,
            side: Side::PlayerOne,
            state: GameState::Playing,
            moves: String::new(),
        })
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        let cols = self.board.cols();
        if column_one_indexed < 1 || column_one_indexed > cols {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                cols
            ));
        }
        let column = column_one_indexed - 1;
        if !self.board.can_play(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        let wins = self.board.is_winning_move(column, self.side);
        self.board.play(column, self.side)?;
        self.state = if wins {
            match self.side {
                Side::PlayerOne => GameState::PlayerOneWin,
                Side::PlayerTwo => GameState::PlayerTwoWin,
            }
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.side = self.side.opponent();
        if !self.moves.is_empty() {
            self.moves.push(',');
        }
        self.moves.push_str(&column_one_indexed.to_string());

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (rows, cols) = (self.board.rows(), self.board.cols());

        let header: String = (1..=cols).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(header + "\n")))?;
        for _ in 0..rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for row in 0..rows {
            for column in 0..cols {
                let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match self.board.grid_value(row, column) {
                                Cell::PlayerOne => Color::Red,
                                Cell::PlayerTwo => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + cols as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
