//! Integration tests for the HEX game
//!
//! Tests the full stack: board, connectivity engine, game state machine,
//! move sources and notation.

use hex_core::{
    board::Cell,
    connectivity::{has_connected, winning_path, Connectivity},
    game::{Game, GameStatus},
    play_out, Board, HexError, MoveSource, Player, RandomMoveSource,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Every cell of an n x n board in random order
fn shuffled_cells(size: usize, rng: &mut ChaCha8Rng) -> Vec<(i32, i32)> {
    let mut cells: Vec<_> = (0..size as i32)
        .flat_map(|r| (0..size as i32).map(move |c| (r, c)))
        .collect();
    cells.shuffle(rng);
    cells
}

/// Fill a board completely with alternating stones
fn random_full_board(size: usize, rng: &mut ChaCha8Rng) -> Board {
    let mut board = Board::new(size).unwrap();
    let mut player = Player::X;
    for (r, c) in shuffled_cells(size, rng) {
        board.place(player, r, c).unwrap();
        player = player.opponent();
    }
    board
}

// ============================================================================
// BOARD STATE TESTS
// ============================================================================

#[test]
fn test_two_by_two_scenario() {
    let mut board = Board::new(2).unwrap();

    board.place(Player::X, 0, 0).unwrap();
    assert!(!has_connected(&board, Player::X));

    board.place(Player::O, 1, 1).unwrap();
    assert!(!has_connected(&board, Player::O));

    assert_eq!(
        board.place(Player::X, 0, 0),
        Err(HexError::CellOccupied { row: 0, col: 0 })
    );
    assert!(matches!(
        board.place(Player::O, 0, -1),
        Err(HexError::OutOfBounds { .. })
    ));
    assert_eq!(Player::from_symbol('Q'), Err(HexError::InvalidPlayer('Q')));
}

#[test]
fn test_rejected_moves_do_not_mutate() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for size in 1..=9 {
        let mut board = Board::new(size).unwrap();
        for (r, c) in shuffled_cells(size, &mut rng).into_iter().take(size) {
            board.place(Player::X, r, c).unwrap();
        }
        let before = board.clone();
        let n = size as i32;
        for (r, c) in [(-1, 0), (0, -1), (n, 0), (0, n), (n, n)] {
            assert!(board.place(Player::O, r, c).is_err());
        }
        assert_eq!(board, before);
    }
}

// ============================================================================
// CONNECTIVITY TESTS
// ============================================================================

#[test]
fn test_eleven_board_lines() {
    let mut board = Board::new(11).unwrap();
    for col in 0..11 {
        board.place(Player::X, 0, col).unwrap();
    }
    assert!(!has_connected(&board, Player::X));

    let mut board = Board::new(11).unwrap();
    for row in 0..11 {
        board.place(Player::X, row, 5).unwrap();
    }
    assert!(has_connected(&board, Player::X));
    assert_eq!(winning_path(&board, Player::X).unwrap().len(), 11);
}

#[test]
fn test_empty_boards() {
    for size in 1..=25 {
        let board = Board::new(size).unwrap();
        for player in Player::ALL {
            assert!(!has_connected(&board, player));
        }
    }
}

#[test]
fn test_no_draws_on_full_boards() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for size in 1..=19 {
        for _ in 0..5 {
            let board = random_full_board(size, &mut rng);
            let x = has_connected(&board, Player::X);
            let o = has_connected(&board, Player::O);
            assert!(x != o, "size {}: expected exactly one winner\n{}", size, board);
        }
    }
}

#[test]
fn test_incremental_agrees_along_random_games() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for size in 1..=19 {
        let mut board = Board::new(size).unwrap();
        let mut links = Connectivity::new(size);
        let mut player = Player::X;
        for (r, c) in shuffled_cells(size, &mut rng) {
            board.place(player, r, c).unwrap();
            links.record(&board, r as usize, c as usize).unwrap();
            for p in Player::ALL {
                assert_eq!(links.is_connected(p), has_connected(&board, p));
            }
            player = player.opponent();
        }

        // Rebuilding from the final position gives the same answer
        let mut rebuilt = Connectivity::from_board(&board);
        for p in Player::ALL {
            assert_eq!(rebuilt.is_connected(p), has_connected(&board, p));
        }
    }
}

// ============================================================================
// GAME TESTS
// ============================================================================

#[test]
fn test_random_games_end_with_one_winner() {
    for seed in 0..50 {
        let mut game = Game::new(9).unwrap();
        let mut x = RandomMoveSource::new(seed);
        let mut o = RandomMoveSource::new(seed + 1000);
        let winner = play_out(&mut game, &mut x, &mut o).unwrap();

        assert_eq!(game.status(), GameStatus::Won { winner });
        assert!(has_connected(game.board(), winner));
        assert!(!has_connected(game.board(), winner.opponent()));

        // The winner made the last move
        assert_eq!(game.moves().last().map(|m| m.player), Some(winner));
        assert!(matches!(
            game.play(winner.opponent(), 0, 0),
            Err(HexError::GameOver { .. })
        ));
    }
}

#[test]
fn test_game_survives_notation_round_trip() {
    let mut game = Game::new(7).unwrap();
    let mut x = RandomMoveSource::new(8);
    let mut o = RandomMoveSource::new(9);

    // Play part of a game, then resume it from notation
    for _ in 0..10 {
        let player = game.to_move().unwrap();
        let source: &mut dyn MoveSource = if player == Player::X { &mut x } else { &mut o };
        let mv = source.propose(game.board(), player).unwrap();
        game.apply(mv).unwrap();
    }

    let notation = game.board().to_notation();
    let board: Board = notation.parse().unwrap();
    assert_eq!(&board, game.board());
    assert_eq!(board.stone_count(), 10);

    let mut resumed = Game::from_board(board, game.to_move().unwrap());
    let a = play_out(&mut game, &mut x.clone(), &mut o.clone()).unwrap();
    let b = play_out(&mut resumed, &mut x, &mut o).unwrap();
    assert_eq!(a, b);
    assert_eq!(game.board(), resumed.board());
}

#[test]
fn test_board_display_shape() {
    let board = Board::from_rows(["X . .", ". O .", ". . X"]).unwrap();
    let text = board.to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "X — . — .");
    assert_eq!(lines[2], "  . — O — .");
    assert_eq!(lines[4], "    . — . — X");
    assert_eq!(board.occupancy(1, 1), Ok(Cell::Stone(Player::O)));
}

// ============================================================================
// PERFORMANCE
// ============================================================================

#[test]
fn test_incremental_check_is_fast() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let start = Instant::now();
    for _ in 0..20 {
        let mut game = Game::new(19).unwrap();
        for (r, c) in shuffled_cells(19, &mut rng) {
            let Some(player) = game.to_move() else { break };
            game.play(player, r, c).unwrap();
        }
        assert!(game.is_over());
    }
    let elapsed = start.elapsed();
    println!("20 full 19x19 games: {:?}", elapsed);
    assert!(elapsed.as_secs() < 30, "incremental checks took too long");
}
