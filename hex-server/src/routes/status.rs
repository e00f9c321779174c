//! Status endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    pub games: usize,
    pub default_size: usize,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: "rust",
        games: state.ids().len(),
        default_size: state.default_size,
    })
}
