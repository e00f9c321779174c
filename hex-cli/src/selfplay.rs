//! Selfplay command - random games in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_batch(), report_results()
//! - Level 3: play_single_game()
//! - Level 4: check_agreement()

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use hex_core::{has_connected, Game, HexConfig, MoveSource, Player, RandomMoveSource};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Board size (defaults to the config value, 11)
    #[arg(long)]
    pub size: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Cross-check the incremental win tracker against a full search after every move
    #[arg(long)]
    pub verify: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    seed: u64,
    winner: Player,
    moves: usize,
}

/// Aggregated batch results
#[derive(Clone, Debug, Serialize)]
struct BatchResults {
    size: usize,
    games: usize,
    x_wins: usize,
    o_wins: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
pub fn run(args: SelfplayArgs, config: &HexConfig) -> Result<()> {
    let size = args.size.unwrap_or(config.size);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting selfplay: {} games on {}x{} (seed={}, verify={})",
        args.games,
        size,
        size,
        base_seed,
        args.verify
    );

    let records = play_batch(size, args.games, base_seed, args.verify)?;
    let results = summarize(size, &records);
    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games on the rayon pool
fn play_batch(size: usize, games: usize, base_seed: u64, verify: bool) -> Result<Vec<GameRecord>> {
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .context("invalid progress template")?,
    );

    let records = (0..games as u64)
        .into_par_iter()
        .map(|i| {
            let record = play_single_game(size, base_seed.wrapping_add(i), verify);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish_and_clear();
    Ok(records)
}

fn summarize(size: usize, records: &[GameRecord]) -> BatchResults {
    let x_wins = records.iter().filter(|r| r.winner == Player::X).count();
    let total_moves: usize = records.iter().map(|r| r.moves).sum();

    BatchResults {
        size,
        games: records.len(),
        x_wins,
        o_wins: records.len() - x_wins,
        avg_moves: if records.is_empty() {
            0.0
        } else {
            total_moves as f32 / records.len() as f32
        },
    }
}

fn report_results(results: &BatchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("Selfplay on {}x{}: {} games", results.size, results.size, results.games);
    println!("  X wins: {} ({:.1}%)", results.x_wins, percent(results.x_wins, results.games));
    println!("  O wins: {} ({:.1}%)", results.o_wins, percent(results.o_wins, results.games));
    println!("  Average moves: {:.1}", results.avg_moves);
    Ok(())
}

// ============================================================================
// LEVEL 3 - SINGLE GAME
// ============================================================================

/// Random vs random. X and O draw from independent streams of the same seed.
fn play_single_game(size: usize, seed: u64, verify: bool) -> Result<GameRecord> {
    let mut game = Game::new(size)?;
    let mut sources = [
        RandomMoveSource::new(seed),
        RandomMoveSource::new(seed ^ 0x9E37_79B9_7F4A_7C15),
    ];

    while let Some(player) = game.to_move() {
        let source = match player {
            Player::X => &mut sources[0],
            Player::O => &mut sources[1],
        };
        let mv = source
            .propose(game.board(), player)
            .with_context(|| format!("seed {}: board filled without a winner", seed))?;
        game.apply(mv)?;

        if verify {
            check_agreement(&game).with_context(|| format!("seed {}, move {}", seed, game.moves().len()))?;
        }
    }

    Ok(GameRecord {
        seed,
        winner: game.winner().context("game ended without a winner")?,
        moves: game.moves().len(),
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// The incremental status must match a from-scratch search
fn check_agreement(game: &Game) -> Result<()> {
    for player in Player::ALL {
        let searched = has_connected(game.board(), player);
        let tracked = game.winner() == Some(player);
        if searched != tracked {
            anyhow::bail!(
                "{}: search says {}, tracker says {}\n{}",
                player,
                searched,
                tracked,
                game.board()
            );
        }
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 * 100.0 / total as f32
    }
}

// ============================================================================
// TESTS
// ============================================================================
