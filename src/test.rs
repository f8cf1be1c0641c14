#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    use crate::{
        arena::{self, Outcome},
        board::{BoardState, Cell, Side},
        config::{EngineConfig, Strategy},
        engine::{Engine, Move},
        error::{BoardError, ConfigError},
        evaluator::{window_count, EvalWeights, Evaluator, WIN_SCORE},
        move_order::{center_out_order, MoveOrderer, MoveOrdering},
        position::Position,
        transposition_table::{Bound, TranspositionTable},
        zobrist::ZobristTable,
        HEIGHT, WIDTH,
    };

    // positions still in play, given as one-indexed move strings
    const POSITIONS: [&str; 10] = [
        "",
        "4",
        "44",
        "4453",
        "3344",
        "44444",
        "3435",
        "1234567",
        "443322",
        "4455327",
    ];

    // a full board without any alignment
    const DRAWN_BOARD: [&str; HEIGHT] = [
        "XOXOXOX", "OOXOXOX", "OOOXOOO", "OXOXOXX", "XOOXXOX", "XXXOXXO",
    ];

    fn config(strategy: Strategy, depth: u32) -> EngineConfig {
        EngineConfig::default()
            .with_strategy(strategy)
            .with_depth(depth)
    }

    fn analyse(
        config: EngineConfig,
        board: &BoardState,
        side: Side,
    ) -> Result<Option<(i32, Move)>> {
        let mut engine = Engine::new(config)?;
        let mut board = board.clone();
        Ok(engine.analyse(&mut board, side))
    }

    fn random_board(rng: &mut Xoshiro256PlusPlus, num_moves: usize) -> Result<BoardState> {
        let mut board = BoardState::new();
        let mut side = Side::PlayerOne;
        for _ in 0..num_moves {
            let legal: Vec<usize> = board.legal_columns().collect();
            if legal.is_empty() {
                break;
            }
            let column = legal[rng.random_range(0..legal.len())];
            board.play(column, side)?;
            side = side.opponent();
        }
        Ok(board)
    }

    #[test]
    pub fn play_undo_round_trip() -> Result<()> {
        let keys = ZobristTable::new(HEIGHT, WIDTH, 7);
        let mut board = BoardState::from_moves("4453")?;
        let before = board.clone();
        let side = board.side_to_move();

        let mut position = Position::new(&mut board, &keys, side);
        let initial_hash = position.hash();
        let mut played = vec![];
        for &column in [3, 3, 0, 6, 3, 2, 2, 5].iter() {
            let row = position.play(column);
            played.push((column, row));
            // the running hash always matches a full recomputation
            assert_eq!(position.hash(), keys.hash(position.board(), position.side()));
        }
        assert_ne!(position.hash(), initial_hash);
        while let Some((column, row)) = played.pop() {
            position.undo(column, row);
        }
        assert_eq!(position.hash(), initial_hash);
        assert_eq!(position.side(), side);

        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn side_to_move_changes_hash() -> Result<()> {
        let keys = ZobristTable::new(HEIGHT, WIDTH, 7);
        let board = BoardState::from_moves("44")?;
        assert_ne!(
            keys.hash(&board, Side::PlayerOne),
            keys.hash(&board, Side::PlayerTwo)
        );
        // the keys only depend on the seed
        assert_eq!(
            keys.hash(&board, Side::PlayerOne),
            ZobristTable::new(HEIGHT, WIDTH, 7).hash(&board, Side::PlayerOne)
        );
        Ok(())
    }

    #[test]
    pub fn gravity_and_full_columns() -> Result<()> {
        let mut board = BoardState::new();
        for row in 0..HEIGHT {
            assert!(board.can_play(2));
            assert_eq!(board.play(2, Side::PlayerOne)?, row);
        }
        assert!(!board.can_play(2));
        assert_eq!(board.grid_value(HEIGHT - 1, 2), Cell::PlayerOne);
        assert_eq!(board.play(2, Side::PlayerTwo), Err(BoardError::ColumnFull(2)));
        assert_eq!(
            board.play(WIDTH, Side::PlayerTwo),
            Err(BoardError::InvalidColumn {
                column: WIDTH,
                width: WIDTH
            })
        );
        assert!(!board.can_play(WIDTH));
        assert_eq!(board.legal_columns().count(), WIDTH - 1);
        assert!(!board.is_full());
        assert!(BoardState::from_rows(&DRAWN_BOARD)?.is_full());
        Ok(())
    }

    #[test]
    pub fn undo_must_match_last_play() -> Result<()> {
        let mut board = BoardState::new();
        let first = board.play(0, Side::PlayerOne)?;
        let second = board.play(1, Side::PlayerTwo)?;

        assert_eq!(
            board.undo(0, first),
            Err(BoardError::InconsistentUndo {
                column: 0,
                row: first,
                expected: Some((1, second)),
            })
        );
        board.undo(1, second)?;
        board.undo(0, first)?;
        assert_eq!(board, BoardState::new());
        assert!(board.undo(0, 0).is_err());
        Ok(())
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "undo does not match the most recent play")]
    pub fn search_undo_out_of_order_panics() {
        let keys = ZobristTable::new(HEIGHT, WIDTH, 7);
        let mut board = BoardState::new();
        let mut position = Position::new(&mut board, &keys, Side::PlayerOne);
        let first = position.play(0);
        position.play(1);
        position.undo(0, first);
    }

    #[test]
    pub fn move_string_parsing() -> Result<()> {
        let board = BoardState::from_moves("4453")?;
        assert_eq!(board.num_moves(), 4);
        assert_eq!(board.grid_value(0, 3), Cell::PlayerOne);
        assert_eq!(board.grid_value(1, 3), Cell::PlayerTwo);
        assert_eq!(board.grid_value(0, 4), Cell::PlayerOne);
        assert_eq!(board.grid_value(0, 2), Cell::PlayerTwo);
        assert_eq!(board.side_to_move(), Side::PlayerOne);

        assert_eq!(BoardState::from_moves("8"), Err(BoardError::Parse("8".into())));
        assert_eq!(BoardState::from_moves("4a"), Err(BoardError::Parse("a".into())));
        assert_eq!(BoardState::from_moves("1111111"), Err(BoardError::ColumnFull(0)));
        assert_eq!(BoardState::from_moves("1213141"), Err(BoardError::GameOver));
        Ok(())
    }

    #[test]
    pub fn text_diagram_parsing() -> Result<()> {
        let board = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", "...O...", "..XX...",
        ])?;
        let played = BoardState::from_moves("443")?;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                assert_eq!(board.grid_value(row, column), played.grid_value(row, column));
            }
        }
        assert_eq!(board.num_moves(), played.num_moves());
        assert_eq!(board.to_string(), played.to_string());
        assert_eq!(board.height(3), 2);
        assert_eq!(board.side_to_move(), Side::PlayerTwo);

        assert_eq!(
            BoardState::from_rows(&["..", "X.", ".."]),
            Err(BoardError::FloatingToken { row: 1, column: 0 })
        );
        assert_eq!(
            BoardState::from_rows(&["..", "X"]),
            Err(BoardError::Parse("X".into()))
        );
        assert!(BoardState::from_rows(&[]).is_err());
        Ok(())
    }

    #[test]
    pub fn winning_move_detection() -> Result<()> {
        let board = BoardState::from_moves("223344")?;
        assert!(board.is_winning_move(0, Side::PlayerOne));
        assert!(board.is_winning_move(4, Side::PlayerOne));
        assert!(!board.is_winning_move(5, Side::PlayerOne));
        assert!(!board.is_winning_move(0, Side::PlayerTwo));

        // vertical
        let board = BoardState::from_moves("121212")?;
        assert!(board.is_winning_move(0, Side::PlayerOne));
        assert!(!board.is_winning_move(1, Side::PlayerOne));

        // diagonal
        let board = BoardState::from_rows(&[
            ".......", ".......", ".......", "..XX...", ".XOO...", "XOOX...",
        ])?;
        assert!(board.is_winning_move(3, Side::PlayerOne));
        assert_eq!(board.winner(), None);

        let mut won = board.clone();
        won.play(3, Side::PlayerOne)?;
        assert_eq!(won.winner(), Some(Side::PlayerOne));
        assert_eq!(won.swap_sides().winner(), Some(Side::PlayerTwo));
        assert_eq!(BoardState::from_rows(&DRAWN_BOARD)?.winner(), None);
        Ok(())
    }

    #[test]
    pub fn evaluator_window_scores() -> Result<()> {
        let evaluator = Evaluator::new(HEIGHT, WIDTH, EvalWeights::default());
        assert_eq!(window_count(HEIGHT, WIDTH), 69);
        assert_eq!(evaluator.evaluate(&BoardState::new()), 0);

        // a corner token sits in one horizontal, one vertical and one diagonal window
        let corner = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", ".......", "X......",
        ])?;
        assert_eq!(evaluator.evaluate(&corner), 3);

        // a center token also earns the center bonus
        let center = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", ".......", "...X...",
        ])?;
        let center_windows = 4 + 1 + 1 + 1;
        assert_eq!(evaluator.evaluate(&center), center_windows + 3);

        // a window holding both players counts for neither
        let blocked = BoardState::from_rows(&["XO.."])?;
        let small = Evaluator::new(1, 4, EvalWeights::default());
        assert_eq!(small.evaluate(&blocked), 0);
        assert_eq!(small.evaluate(&BoardState::from_rows(&["XX.."])?), 3);
        // the third token sits in the center column
        assert_eq!(small.evaluate(&BoardState::from_rows(&["XXX."])?), 6 + 3);
        assert_eq!(small.evaluate(&BoardState::from_rows(&[".OOO"])?), -6 - 3);

        let won = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ])?;
        assert_eq!(evaluator.evaluate(&won), WIN_SCORE);
        assert_eq!(evaluator.evaluate(&won.swap_sides()), -WIN_SCORE);
        Ok(())
    }

    #[test]
    pub fn evaluator_sign_symmetry() -> Result<()> {
        let evaluator = Evaluator::new(HEIGHT, WIDTH, EvalWeights::default());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for game in 0..200 {
            let board = random_board(&mut rng, game % (WIDTH * HEIGHT + 1))?;
            assert_eq!(
                evaluator.evaluate(&board.swap_sides()),
                -evaluator.evaluate(&board),
                "asymmetric evaluation of\n{}",
                board
            );
        }
        let drawn = BoardState::from_rows(&DRAWN_BOARD)?;
        assert_eq!(evaluator.evaluate(&drawn.swap_sides()), -evaluator.evaluate(&drawn));
        Ok(())
    }

    #[test]
    pub fn heuristic_stays_below_win_score() -> Result<()> {
        let weights = EvalWeights::default();
        assert!(weights.max_heuristic(HEIGHT, WIDTH) < WIN_SCORE as i64);
        weights.validate(HEIGHT, WIDTH)?;

        let evaluator = Evaluator::new(HEIGHT, WIDTH, weights);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..200 {
            let board = random_board(&mut rng, 20)?;
            let score = evaluator.evaluate(&board);
            if !Evaluator::is_decisive(score) {
                assert!((score.abs() as i64) <= weights.max_heuristic(HEIGHT, WIDTH));
            }
        }
        Ok(())
    }

    #[test]
    pub fn transposition_bounds() {
        let mut table = TranspositionTable::new(0);
        table.set(1, 3, 40, Bound::Exact);
        table.set(2, 5, 50, Bound::LowerBound);
        table.set(3, 5, -20, Bound::UpperBound);

        let (mut alpha, mut beta) = (0, 100);
        assert_eq!(table.probe(1, 3, &mut alpha, &mut beta), Some(40));
        // too shallow for a deeper search
        assert_eq!(table.probe(1, 4, &mut alpha, &mut beta), None);
        assert_eq!((alpha, beta), (0, 100));

        // a lower bound raises alpha
        assert_eq!(table.probe(2, 5, &mut alpha, &mut beta), None);
        assert_eq!((alpha, beta), (50, 100));
        let (mut alpha, mut beta) = (0, 45);
        assert_eq!(table.probe(2, 4, &mut alpha, &mut beta), Some(50));

        // an upper bound lowers beta
        let (mut alpha, mut beta) = (-100, 100);
        assert_eq!(table.probe(3, 2, &mut alpha, &mut beta), None);
        assert_eq!((alpha, beta), (-100, -20));
        let (mut alpha, mut beta) = (-10, 100);
        assert_eq!(table.probe(3, 5, &mut alpha, &mut beta), Some(-20));

        let (mut alpha, mut beta) = (-100, 100);
        assert_eq!(table.probe(4, 0, &mut alpha, &mut beta), None);
    }

    #[test]
    pub fn transposition_capacity() {
        let mut bounded = TranspositionTable::new(8);
        let mut unbounded = TranspositionTable::new(0);
        for key in 0..20u64 {
            bounded.set(key, 1, key as i32, Bound::Exact);
            unbounded.set(key, 1, key as i32, Bound::Exact);
        }
        assert_eq!(bounded.capacity(), Some(8));
        assert_eq!(bounded.len(), 8);
        assert_eq!(unbounded.capacity(), None);
        assert_eq!(unbounded.len(), 20);

        // keys 3, 11 and 19 share a slot, the newest entry wins
        assert_eq!(bounded.get(3), None);
        assert_eq!(bounded.get(11), None);
        assert_eq!(bounded.get(19).map(|entry| entry.score), Some(19));
        assert_eq!(unbounded.get(3).map(|entry| entry.score), Some(3));

        bounded.clear();
        assert!(bounded.is_empty());
    }

    #[test]
    pub fn center_out_ordering() -> Result<()> {
        assert_eq!(center_out_order(7), vec![3, 2, 4, 1, 5, 0, 6]);
        assert_eq!(center_out_order(6), vec![3, 2, 4, 1, 5, 0]);
        assert_eq!(center_out_order(1), vec![0]);

        let keys = ZobristTable::new(HEIGHT, WIDTH, 1);
        let evaluator = Evaluator::new(HEIGHT, WIDTH, EvalWeights::default());
        let mut board = BoardState::from_moves("444444")?;
        let before = board.clone();
        let mut position = Position::new(&mut board, &keys, Side::PlayerOne);

        let fixed = MoveOrderer::new(WIDTH, MoveOrdering::Static).order(&mut position, &evaluator);
        assert_eq!(fixed.to_vec(), vec![2, 4, 1, 5, 0, 6]);

        let dynamic =
            MoveOrderer::new(WIDTH, MoveOrdering::Dynamic).order(&mut position, &evaluator);
        let mut sorted = dynamic.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 4, 5, 6]);
        // central moves score best for the mover here
        assert!(dynamic[0] == 2 || dynamic[0] == 4);
        assert_eq!(position.board(), &before);
        Ok(())
    }

    #[test]
    pub fn strategies_agree() -> Result<()> {
        let mut configs = vec![];
        for &strategy in Strategy::ALL.iter() {
            for &ordering in [MoveOrdering::Static, MoveOrdering::Dynamic].iter() {
                configs.push(
                    EngineConfig::default()
                        .with_strategy(strategy)
                        .with_move_ordering(ordering),
                );
            }
        }
        // narrow aspiration windows that must be widened or abandoned
        let mut narrow = EngineConfig::default().with_strategy(Strategy::Aspiration);
        narrow.aspiration_window_width = 1;
        narrow.aspiration_max_retries = 1;
        configs.push(narrow);

        for moves in POSITIONS.iter() {
            let board = BoardState::from_moves(moves)?;
            let side = board.side_to_move();
            for depth in 1..=5 {
                let (expected, _) = analyse(config(Strategy::Negamax, depth), &board, side)?
                    .ok_or_else(|| anyhow!("no move for {}", moves))?;

                for config in configs.iter() {
                    let (score, proposal) = analyse(config.clone().with_depth(depth), &board, side)?
                        .ok_or_else(|| anyhow!("no move for {}", moves))?;
                    assert_eq!(
                        score, expected,
                        "{} with {:?} ordering disagrees on '{}' at depth {}",
                        config.strategy, config.move_ordering, moves, depth
                    );
                    assert!(board.can_play(proposal.column));
                    assert_eq!(proposal.row, board.height(proposal.column));

                    // the chosen column must be worth the reported score
                    if depth >= 2 && !Evaluator::is_decisive(score) {
                        let mut child = board.clone();
                        child.play(proposal.column, side)?;
                        let reference = self::config(Strategy::Negamax, depth - 1);
                        if let Some((child_score, _)) =
                            analyse(reference, &child, side.opponent())?
                        {
                            assert_eq!(-child_score, score);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn deeper_search_agreement() -> Result<()> {
        let board = BoardState::from_moves("4453")?;
        let side = board.side_to_move();
        let (expected, _) = analyse(config(Strategy::AlphaBeta, 7), &board, side)?
            .ok_or_else(|| anyhow!("no move"))?;
        for &strategy in [Strategy::NegaScout, Strategy::Mtdf, Strategy::Aspiration].iter() {
            let (score, _) = analyse(config(strategy, 7), &board, side)?
                .ok_or_else(|| anyhow!("no move"))?;
            assert_eq!(score, expected, "{} disagrees", strategy);
        }
        Ok(())
    }

    #[test]
    pub fn small_table_agreement() -> Result<()> {
        // a tiny slotted table keeps overwriting entries during the search
        for moves in POSITIONS.iter() {
            let board = BoardState::from_moves(moves)?;
            let side = board.side_to_move();
            for depth in 1..=5 {
                let (expected, _) = analyse(config(Strategy::Negamax, depth), &board, side)?
                    .ok_or_else(|| anyhow!("no move for {}", moves))?;
                for &strategy in Strategy::ALL.iter() {
                    let mut small = config(strategy, depth);
                    small.transposition_table_capacity = 64;
                    let (score, proposal) = analyse(small, &board, side)?
                        .ok_or_else(|| anyhow!("no move for {}", moves))?;
                    assert_eq!(
                        score, expected,
                        "{} with a 64 entry table disagrees on '{}' at depth {}",
                        strategy, moves, depth
                    );
                    assert!(board.can_play(proposal.column));
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn widest_aspiration_window() -> Result<()> {
        let mut widest = config(Strategy::Aspiration, 3);
        widest.aspiration_window_width = i32::MAX;
        widest.validate()?;

        let board = BoardState::from_moves("4453")?;
        let side = board.side_to_move();
        let (expected, _) = analyse(config(Strategy::Negamax, 3), &board, side)?
            .ok_or_else(|| anyhow!("no move"))?;

        // the second search starts its window from the first score
        let mut engine = Engine::new(widest)?;
        for _ in 0..3 {
            let mut board = board.clone();
            let (score, proposal) = engine
                .analyse(&mut board, side)
                .ok_or_else(|| anyhow!("no move"))?;
            assert_eq!(score, expected);
            assert!(board.can_play(proposal.column));
        }
        Ok(())
    }

    #[test]
    pub fn immediate_win() -> Result<()> {
        // player one holds the bottom row in columns 1, 2 and 3, column 4 is open
        let mut board = BoardState::from_moves("223347")?;
        for &strategy in Strategy::ALL.iter() {
            for depth in 1..=4 {
                let mut engine = Engine::new(config(strategy, depth))?;
                assert_eq!(
                    engine.propose_move(&mut board, Side::PlayerOne),
                    Some(Move { row: 0, column: 4 })
                );
                assert_eq!(engine.last_score(), Some(WIN_SCORE + depth as i32 - 1));
                assert_eq!(engine.score_to_win_distance(WIN_SCORE + depth as i32 - 1), Some(1));
                // decided without searching
                assert_eq!(engine.node_count, 0);
            }
        }
        Ok(())
    }

    #[test]
    pub fn immediate_block() -> Result<()> {
        // player two holds the bottom row in columns 4, 5 and 6
        let mut board = BoardState::from_moves("151627")?;
        assert!(board.is_winning_move(3, Side::PlayerTwo));
        assert!(!(0..WIDTH).any(|column| board.is_winning_move(column, Side::PlayerOne)));

        for &strategy in Strategy::ALL.iter() {
            for depth in 2..=5 {
                let mut engine = Engine::new(config(strategy, depth))?;
                let proposal = engine.propose_move(&mut board, Side::PlayerOne);
                assert_eq!(
                    proposal.map(|proposal| proposal.column),
                    Some(3),
                    "{} at depth {} does not block",
                    strategy,
                    depth
                );
            }
        }
        Ok(())
    }

    #[test]
    pub fn sees_forced_loss() -> Result<()> {
        // player two threatens two columns at once, player one cannot stop both
        let board = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", "..XX...", "X.OOO..",
        ])?;
        assert!(board.is_winning_move(1, Side::PlayerTwo));
        assert!(board.is_winning_move(5, Side::PlayerTwo));
        for &strategy in Strategy::ALL.iter() {
            let (score, _) = analyse(config(strategy, 3), &board, Side::PlayerOne)?
                .ok_or_else(|| anyhow!("no move"))?;
            assert!(score <= -WIN_SCORE, "{} scored {}", strategy, score);
        }
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let mut board = BoardState::from_rows(&DRAWN_BOARD)?;
        for &strategy in Strategy::ALL.iter() {
            let mut engine = Engine::new(config(strategy, 4))?;
            assert_eq!(engine.propose_move(&mut board, Side::PlayerOne), None);
            assert_eq!(engine.propose_move(&mut board, Side::PlayerTwo), None);
        }

        let mut tiny = BoardState::from_rows(&["XO", "OX"])?;
        let mut small = EngineConfig::default().with_depth(2);
        small.rows = 2;
        small.cols = 2;
        assert_eq!(Engine::new(small)?.propose_move(&mut tiny, Side::PlayerOne), None);
        Ok(())
    }

    #[test]
    pub fn decided_board_has_no_move() -> Result<()> {
        let mut board = BoardState::from_rows(&[
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ])?;
        let mut engine = Engine::new(EngineConfig::default())?;
        assert_eq!(engine.propose_move(&mut board, Side::PlayerTwo), None);
        Ok(())
    }

    #[test]
    pub fn board_is_restored_after_search() -> Result<()> {
        for &strategy in Strategy::ALL.iter() {
            let mut board = BoardState::from_moves("3435")?;
            let before = board.clone();
            let mut engine = Engine::new(config(strategy, 5))?;
            engine.propose_move(&mut board, Side::PlayerOne);
            assert_eq!(board, before);
        }
        Ok(())
    }

    #[test]
    pub fn deterministic_choice() -> Result<()> {
        for moves in ["", "4453", "3344"].iter() {
            let board = BoardState::from_moves(moves)?;
            let side = board.side_to_move();
            for &strategy in Strategy::ALL.iter() {
                let first = analyse(config(strategy, 5), &board, side)?;
                let second = analyse(config(strategy, 5), &board, side)?;
                assert_eq!(first, second);
            }

            // the Zobrist seed only changes where positions are cached
            let mut reseeded = config(Strategy::AlphaBeta, 5);
            reseeded.zobrist_seed ^= 0xdead_beef;
            assert_eq!(
                analyse(config(Strategy::AlphaBeta, 5), &board, side)?,
                analyse(reseeded, &board, side)?
            );
        }
        Ok(())
    }

    #[test]
    pub fn table_persists_between_moves() -> Result<()> {
        let mut board = BoardState::from_moves("44")?;
        let mut engine = Engine::new(config(Strategy::Mtdf, 5))?;
        let first = engine
            .propose_move(&mut board, Side::PlayerOne)
            .ok_or_else(|| anyhow!("no move"))?;
        let cached = engine.transposition_table().len();
        assert!(cached > 0);

        board.play(first.column, Side::PlayerOne)?;
        board.play(3, Side::PlayerTwo)?;
        engine
            .propose_move(&mut board, Side::PlayerOne)
            .ok_or_else(|| anyhow!("no move"))?;
        assert!(engine.transposition_table().len() >= cached);

        let mut reference = Engine::new(config(Strategy::Negamax, 5))?;
        reference.propose_move(&mut board, Side::PlayerOne);
        assert!(reference.transposition_table().is_empty());
        Ok(())
    }

    #[test]
    pub fn pruning_visits_fewer_nodes() -> Result<()> {
        let mut board = BoardState::new();
        let mut counts = vec![];
        for &strategy in [Strategy::Negamax, Strategy::AlphaBeta, Strategy::NegaScout].iter() {
            let mut engine = Engine::new(config(strategy, 6))?;
            engine.propose_move(&mut board, Side::PlayerOne);
            counts.push(engine.node_count);
        }
        println!(
            "Nodes at depth 6: negamax {}, alpha-beta {}, negascout {}",
            counts[0], counts[1], counts[2]
        );
        assert!(counts[1] < counts[0]);
        assert!(counts[2] < counts[0]);
        Ok(())
    }

    #[test]
    pub fn other_board_sizes() -> Result<()> {
        let mut small = EngineConfig::default().with_depth(4);
        small.rows = 4;
        small.cols = 5;
        let mut board = BoardState::with_dimensions(4, 5)?;
        board.play(0, Side::PlayerOne)?;
        board.play(0, Side::PlayerTwo)?;
        board.play(1, Side::PlayerOne)?;
        board.play(1, Side::PlayerTwo)?;
        board.play(2, Side::PlayerOne)?;
        board.play(4, Side::PlayerTwo)?;

        for &strategy in Strategy::ALL.iter() {
            let mut engine = Engine::new(small.clone().with_strategy(strategy))?;
            assert_eq!(
                engine.propose_move(&mut board, Side::PlayerOne),
                Some(Move { row: 0, column: 3 })
            );
        }

        assert!(BoardState::with_dimensions(0, 7).is_err());
        assert!(BoardState::with_dimensions(6, 17).is_err());
        Ok(())
    }

    #[test]
    #[should_panic(expected = "engine configured for a 6x7 board")]
    pub fn mismatched_board_panics() {
        let mut board = BoardState::with_dimensions(5, 5).unwrap();
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.propose_move(&mut board, Side::PlayerOne);
    }

    #[test]
    pub fn config_validation() -> Result<()> {
        EngineConfig::default().validate()?;

        assert!(matches!(
            EngineConfig::default().with_depth(0).validate(),
            Err(ConfigError::InvalidDepth { depth: 0, .. })
        ));
        assert!(matches!(
            EngineConfig::default().with_depth(43).validate(),
            Err(ConfigError::InvalidDepth { depth: 43, max: 42 })
        ));

        let mut config = EngineConfig::default();
        config.weights.double = config.weights.triple;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));

        let mut config = EngineConfig::default();
        config.weights.triple = WIN_SCORE / 10;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));

        let mut config = EngineConfig::default();
        config.aspiration_window_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAspiration)));

        let mut config = EngineConfig::default();
        config.cols = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Board(_))));
        assert!(Engine::new(config).is_err());
        Ok(())
    }

    #[test]
    pub fn config_files() -> Result<()> {
        let config = EngineConfig::default()
            .with_strategy(Strategy::NegaScout)
            .with_move_ordering(MoveOrdering::Dynamic);
        let json = serde_json::to_string_pretty(&config)?;
        assert_eq!(serde_json::from_str::<EngineConfig>(&json)?, config);

        // missing fields take their defaults
        let partial: EngineConfig =
            serde_json::from_str(r#"{ "max_search_depth": 3, "strategy": "Mtdf" }"#)?;
        assert_eq!(partial.max_search_depth, 3);
        assert_eq!(partial.strategy, Strategy::Mtdf);
        assert_eq!(partial.cols, WIDTH);

        let path = std::env::temp_dir()
            .join(format!("connect4_config_{}.json", std::process::id()));
        std::fs::write(&path, &json)?;
        assert_eq!(EngineConfig::load(&path)?, config);
        std::fs::write(&path, r#"{ "max_search_depth": 0 }"#)?;
        assert!(EngineConfig::load(&path).is_err());
        assert_eq!(EngineConfig::load_or_default(&path), EngineConfig::default());
        std::fs::remove_file(&path)?;

        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_))));
        Ok(())
    }

    #[test]
    pub fn arena_game_is_legal() -> Result<()> {
        let first = config(Strategy::AlphaBeta, 3);
        let second = config(Strategy::Mtdf, 2);
        let record = arena::play_game(&first, &second, Some(3))?;
        assert_eq!(record.moves[0], 3);

        // replay the game to check every move and the result
        let mut board = BoardState::new();
        let mut side = Side::PlayerOne;
        let mut winner = None;
        for (i, &column) in record.moves.iter().enumerate() {
            assert!(winner.is_none(), "move {} played after the game ended", i);
            if board.is_winning_move(column, side) {
                winner = Some(side);
            }
            board.play(column, side)?;
            side = side.opponent();
        }
        let outcome = match winner {
            Some(Side::PlayerOne) => Outcome::FirstPlayerWin,
            Some(Side::PlayerTwo) => Outcome::SecondPlayerWin,
            None => {
                assert!(board.is_full());
                Outcome::Draw
            }
        };
        assert_eq!(record.outcome, outcome);
        Ok(())
    }

    #[test]
    pub fn arena_match_counts() -> Result<()> {
        let first = config(Strategy::NegaScout, 3);
        let second = config(Strategy::Negamax, 1);
        let report = arena::run_match(&first, &second, 6, false)?;
        assert_eq!(report.games.len(), 6);
        assert_eq!(
            report.first_config_wins + report.second_config_wins + report.draws,
            6
        );
        println!("{}", report);

        let mut other = config(Strategy::AlphaBeta, 3);
        other.cols = 5;
        assert!(arena::play_game(&first, &other, None).is_err());

        // every game fails, the match reports the error once the worker is done
        let error = arena::run_match(&first, &other, 8, false)
            .err()
            .ok_or_else(|| anyhow!("match between different boards succeeded"))?;
        assert!(error.to_string().starts_with("match aborted after"));
        assert!(format!("{:#}", error).contains("engines configured for different boards"));
        Ok(())
    }
}
