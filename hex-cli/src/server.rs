//! Server command - start the HTTP game server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to hex-server crate)

use anyhow::Result;
use clap::Args;

use hex_core::HexConfig;
use hex_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on (defaults to the config value, 8002)
    #[arg(long)]
    pub port: Option<u16>,

    /// Board size for games created without one
    #[arg(long)]
    pub size: Option<usize>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
pub fn run(args: ServerArgs, config: &HexConfig) -> Result<()> {
    let config = configure_server(&args, config)?;

    tracing::info!("Starting HEX server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge command arguments over the loaded config
fn configure_server(args: &ServerArgs, config: &HexConfig) -> Result<ServerConfig> {
    let mut merged = config.clone();
    if let Some(port) = args.port {
        merged.port = port;
    }
    if let Some(size) = args.size {
        merged.size = size;
    }
    merged.validate()?;

    Ok(ServerConfig::from(&merged))
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// TESTS
// ============================================================================
