//! Example to run the HEX server standalone
//!
//! Run with: cargo run -p hex-server --example run_server

use hex_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        port: 8002,
        default_size: 11,
        seed: None,
    };

    println!("Starting HEX server on port {}", config.port);
    println!("Create a game: curl -X POST -H 'content-type: application/json' -d '{{}}' http://localhost:{}/api/games", config.port);

    run_server(config).await
}
