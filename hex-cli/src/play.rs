//! Play command - a human against the random computer on the console
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game()
//! - Level 3: human_move(), computer_move()
//! - Level 4: read_int() input sanitization

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use hex_core::{Game, HexConfig, MoveSource, Player, RandomMoveSource};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (defaults to the config value, 11)
    #[arg(long)]
    pub size: Option<usize>,

    /// Side to play: X (top-bottom, moves first) or O (left-right)
    #[arg(long)]
    pub side: Option<Player>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, config: &HexConfig) -> Result<()> {
    let size = args.size.unwrap_or(config.size);
    let human = args.side.unwrap_or(config.human);
    let mut game = Game::new(size)?;
    let mut computer = match config.seed {
        Some(seed) => RandomMoveSource::new(seed),
        None => RandomMoveSource::from_entropy(),
    };

    tracing::info!("Starting {}x{} game, human plays {}", size, size, human);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let winner = play_game(&mut game, human, &mut computer, &mut input, &mut out)?;

    writeln!(out, "{}", game.board())?;
    if winner == human {
        writeln!(out, "You win!")?;
    } else {
        writeln!(out, "The computer wins.")?;
    }
    if let Some(path) = game.winning_path() {
        writeln!(out, "Winning chain: {:?}", path)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Alternate human and computer moves until someone connects their sides
fn play_game<R: BufRead, W: Write>(
    game: &mut Game,
    human: Player,
    computer: &mut dyn MoveSource,
    input: &mut R,
    out: &mut W,
) -> Result<Player> {
    while let Some(player) = game.to_move() {
        if player == human {
            human_move(game, player, input, out)?;
        } else {
            computer_move(game, player, computer, out)?;
        }
    }
    game.winner().context("game ended without a winner")
}

// ============================================================================
// LEVEL 3 - MOVES
// ============================================================================

/// Prompt until the human enters a legal move
fn human_move<R: BufRead, W: Write>(
    game: &mut Game,
    player: Player,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", game.board())?;
    loop {
        let row = read_int(input, out, "Please enter your move row: ")?;
        let col = read_int(input, out, "Please enter your move column: ")?;
        match game.play(player, row, col) {
            Ok(_) => return Ok(()),
            Err(e) => writeln!(out, "Warning: {}", e)?,
        }
    }
}

fn computer_move<W: Write>(
    game: &mut Game,
    player: Player,
    computer: &mut dyn MoveSource,
    out: &mut W,
) -> Result<()> {
    let mv = computer
        .propose(game.board(), player)
        .context("computer found no empty cell")?;
    game.apply(mv)?;
    writeln!(out, "Computer ({}) plays ({},{})", player, mv.row, mv.col)?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - INPUT
// ============================================================================

/// Read lines until one parses as an integer
fn read_int<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<i32> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input closed");
        }
        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => {
                write!(out, "Please input a valid int: ")?;
                out.flush()?;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
