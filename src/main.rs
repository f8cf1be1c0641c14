use anyhow::Result;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use connect4_search::{
    arena,
    config::{EngineConfig, CONFIG_PATH},
    Engine, Strategy,
};

mod game;
use game::*;

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer)
}

fn ask_yes_no(question: &str) -> Result<bool> {
    loop {
        let answer = prompt(&format!("{} y/n: ", question))?;
        match answer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_strategy(question: &str, default: Strategy) -> Result<Strategy> {
    let choices: Vec<String> = Strategy::ALL
        .iter()
        .enumerate()
        .map(|(i, strategy)| format!("{}) {}", i + 1, strategy))
        .collect();
    loop {
        let answer = prompt(&format!(
            "{} [{}] (default {}): ",
            question,
            choices.join(", "),
            default
        ))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(choice) if (1..=Strategy::ALL.len()).contains(&choice) => {
                return Ok(Strategy::ALL[choice - 1])
            }
            _ => println!("Unknown strategy: {}", answer),
        }
    }
}

fn ask_number(question: &str, default: usize) -> Result<usize> {
    loop {
        let answer = prompt(&format!("{} (default {}): ", question, default))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(number) if number > 0 => return Ok(number),
            _ => println!("Invalid number: {}", answer),
        }
    }
}

fn run_match(config: &EngineConfig) -> Result<()> {
    let first = config
        .clone()
        .with_strategy(ask_strategy("First engine strategy", config.strategy)?);
    let second = config
        .clone()
        .with_strategy(ask_strategy("Second engine strategy", config.strategy)?);
    let games = ask_number("Number of games", 20)?;

    let report = arena::run_match(&first, &second, games, true)?;
    println!(
        "{} ({}) against {} ({})",
        first.strategy, report.first_config_wins, second.strategy, report.second_config_wins
    );
    println!("{}", report);
    Ok(())
}

fn play_game(config: &EngineConfig) -> Result<()> {
    let mut game = Game::new(config.rows, config.cols)?;

    // keep the engines out here so their transposition tables are re-used between moves
    let mut engines: [Option<Engine>; 2] = [None, None];
    for (i, engine) in engines.iter_mut().enumerate() {
        if ask_yes_no(&format!("Is player {} AI controlled?", i + 1))? {
            let strategy = ask_strategy("Search strategy", config.strategy)?;
            *engine = Some(Engine::new(config.clone().with_strategy(strategy))?);
        }
    }
    let both_ai = engines.iter().all(Option::is_some);

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let player = game.side.index() + 1;
                let next_move = match engines[game.side.index()].as_mut() {
                    // AI player
                    Some(engine) => {
                        println!("AI is thinking...");
                        stdout().flush()?;

                        // slow down play if both players are AI
                        if both_ai {
                            std::thread::sleep(std::time::Duration::new(2, 0));
                        }

                        let side = game.side;
                        let (score, proposal) = match engine.analyse(&mut game.board, side) {
                            Some(analysis) => analysis,
                            None => {
                                println!("No move available");
                                break;
                            }
                        };

                        match engine.score_to_win_distance(score) {
                            Some(distance) => {
                                let winner = if score > 0 { player } else { 3 - player };
                                let move_string = if distance == 1 { "move" } else { "moves" };
                                println!(
                                    "Player {} can force a win in at most {} {}.",
                                    winner, distance, move_string
                                );
                            }
                            None => match score.cmp(&0) {
                                Ordering::Greater => {
                                    println!("Player {} is ahead ({}).", player, score)
                                }
                                Ordering::Less => {
                                    println!("Player {} is behind ({}).", player, score)
                                }
                                Ordering::Equal => println!("The position is balanced."),
                            },
                        }

                        println!("Best move: {}", proposal.column + 1);
                        proposal.column + 1
                    }

                    // human player
                    None => {
                        let input_str = prompt("Move input > ")?;
                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins! ({})", game.moves);
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins! ({})", game.moves);
                break;
            }
            GameState::Draw => {
                println!("Draw! ({})", game.moves);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Welcome to Connect 4\n");

    let config = EngineConfig::load_or_default(CONFIG_PATH);
    println!(
        "Engines search {} plies deep on a {}x{} board",
        config.max_search_depth, config.cols, config.rows
    );

    if ask_yes_no("Run an engine against engine match instead of a game?")? {
        run_match(&config)
    } else {
        play_game(&config)
    }
}

