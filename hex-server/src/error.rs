//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hex_core::HexError;
use serde::Serialize;

/// Error body: `{"error": "...", "code": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

#[derive(Debug)]
pub enum ApiError {
    /// Rejected by the game core
    Game(HexError),
    /// No game with this id
    NotFound(u64),
}

impl From<HexError> for ApiError {
    fn from(err: HexError) -> Self {
        ApiError::Game(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Game(err) => match err {
                HexError::CellOccupied { .. } | HexError::OutOfTurn { .. } | HexError::GameOver { .. } => {
                    StatusCode::CONFLICT
                }
                HexError::InvalidPlayer(_)
                | HexError::OutOfBounds { .. }
                | HexError::InvalidQuery(_)
                | HexError::InvalidSize(_)
                | HexError::Parse(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::NotFound(id) => ErrorBody {
                error: format!("no game with id {}", id),
                code: "NotFound",
            },
            ApiError::Game(err) => ErrorBody {
                error: err.to_string(),
                code: err.code(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
