//! HEX CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer on the console
//! - selfplay: Run batches of random games and report statistics
//! - serve: Start the HTTP game server

mod play;
mod selfplay;
mod server;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hex_core::HexConfig;

#[derive(Parser)]
#[command(name = "hex")]
#[command(about = "Hex board game with connectivity-based win detection")]
struct Cli {
    /// JSON config file (flags override its values)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for reproducible computer moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer on the console
    Play(play::PlayArgs),
    /// Play random games against each other
    Selfplay(selfplay::SelfplayArgs),
    /// Start the HTTP game server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so prompts and reports stay clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Play(args) => play::run(args, &config),
        Commands::Selfplay(args) => selfplay::run(args, &config),
        Commands::Serve(args) => server::run(args, &config),
    }
}

/// Config file (or defaults) with the global seed flag applied
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<HexConfig> {
    let config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            HexConfig::load(path)?
        }
        None => HexConfig::default(),
    };

    let seed = seed.or(config.seed);
    Ok(config.with_seed(seed))
}
