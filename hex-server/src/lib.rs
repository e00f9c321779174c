//! HEX Server - HTTP API for remote move sources
//!
//! This crate hosts many independent games:
//! - REST API for creating games and submitting moves
//! - Random computer opponent per game
//! - One lock per game; games never share state

mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{GameId, GameSession, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Board size for games created without one
    pub default_size: usize,
    /// Base seed for computer opponents
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            default_size: hex_core::DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl From<&hex_core::HexConfig> for ServerConfig {
    fn from(config: &hex_core::HexConfig) -> Self {
        Self {
            port: config.port,
            default_size: config.size,
            seed: config.seed,
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Game API
        .route(
            "/api/games",
            get(routes::games::list_games).post(routes::games::create_game),
        )
        .route(
            "/api/games/:id",
            get(routes::games::get_game).delete(routes::games::delete_game),
        )
        .route("/api/games/:id/board", get(routes::games::render_game))
        .route("/api/games/:id/move", post(routes::games::make_move))
        .route(
            "/api/games/:id/computer-move",
            post(routes::games::computer_move),
        )
        // Shared state
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.default_size, config.seed));
    let router = create_router(state);

    tracing::info!("HEX Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Default board size: {}", config.default_size);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
