//! Game API: create games, submit moves, ask the computer to move

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use hex_core::{Board, Game, GameStatus, HexError, Move, MoveSource, Player};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::{lock, GameId, GameSession, ServerState};

/// Game snapshot returned by every game endpoint
#[derive(Debug, Serialize)]
pub struct GameView {
    pub id: GameId,
    pub size: usize,
    /// Board in notation form
    pub board: String,
    pub to_move: Option<Player>,
    pub winner: Option<Player>,
    pub moves: Vec<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<[usize; 2]>>,
}

impl GameView {
    fn new(id: GameId, game: &Game) -> Self {
        Self {
            id,
            size: game.size(),
            board: game.board().to_notation(),
            to_move: game.to_move(),
            winner: game.winner(),
            moves: game.moves().to_vec(),
            path: game
                .winning_path()
                .map(|path| path.into_iter().map(|(r, c)| [r, c]).collect()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub size: Option<usize>,
    /// Optional starting position in notation form
    pub board: Option<String>,
    pub to_move: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub player: String,
    pub row: i32,
    pub col: i32,
}

/// List hosted games
pub async fn list_games(State(state): State<Arc<ServerState>>) -> Json<Vec<GameView>> {
    let views = state
        .ids()
        .into_iter()
        .filter_map(|id| {
            let session = state.get(id)?;
            let session = lock(&session);
            Some(GameView::new(id, &session.game))
        })
        .collect();
    Json(views)
}

/// Start a new game
pub async fn create_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let game = match req.board {
        Some(notation) => {
            let board: Board = notation.parse()?;
            let to_move: Player = match req.to_move {
                Some(symbol) => symbol.parse()?,
                None => Player::X,
            };
            Game::from_board(board, to_move)
        }
        None => Game::new(req.size.unwrap_or(state.default_size))?,
    };

    let view_game = game.clone();
    let id = state.insert(game);
    tracing::info!("Created game {} ({}x{})", id, view_game.size(), view_game.size());

    Ok((StatusCode::CREATED, Json(GameView::new(id, &view_game))))
}

/// Current state of a game
pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.get(id).ok_or(ApiError::NotFound(id))?;
    let session = lock(&session);
    Ok(Json(GameView::new(id, &session.game)))
}

/// Board as a text diagram
pub async fn render_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<GameId>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.get(id).ok_or(ApiError::NotFound(id))?;
    let text = lock(&session).game.board().to_string();
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// Drop a finished or abandoned game
pub async fn delete_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<GameId>,
) -> Result<StatusCode, ApiError> {
    if !state.remove(id) {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!("Removed game {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a player's move
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<GameId>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameView>, ApiError> {
    let player: Player = req.player.parse()?;
    let session = state.get(id).ok_or(ApiError::NotFound(id))?;
    let mut session = lock(&session);

    apply_logged(id, &mut session, Move::new(player, req.row, req.col))?;
    Ok(Json(GameView::new(id, &session.game)))
}

/// Let the computer play for the side to move
pub async fn computer_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.get(id).ok_or(ApiError::NotFound(id))?;
    let mut session = lock(&session);

    let player = match session.game.status() {
        GameStatus::Won { winner } => return Err(HexError::GameOver { winner }.into()),
        GameStatus::InProgress { to_move } => to_move,
    };
    let GameSession { game, computer } = &mut *session;
    let mv = computer
        .propose(game.board(), player)
        .ok_or_else(|| HexError::InvalidQuery("no empty cell left".to_string()))?;

    apply_logged(id, &mut session, mv)?;
    Ok(Json(GameView::new(id, &session.game)))
}

/// Apply a move under the session lock and log the outcome
fn apply_logged(id: GameId, session: &mut GameSession, mv: Move) -> Result<(), ApiError> {
    match session.game.apply(mv) {
        Ok(_) => {
            tracing::debug!("Game {}: {} played ({},{})", id, mv.player, mv.row, mv.col);
            if let Some(winner) = session.game.winner() {
                tracing::info!("Game {}: {} wins after {} moves", id, winner, session.game.moves().len());
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!("Game {}: rejected {:?}: {}", id, mv, err);
            Err(err.into())
        }
    }
}
