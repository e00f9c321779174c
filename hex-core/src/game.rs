//! Game state: turn order, move application and the win check

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::connectivity::{winning_path, Connectivity};
use crate::error::{HexError, Result};

// ============================================================================
// CORE TYPES
// ============================================================================

/// A stone placement request. Coordinates are signed so that bad input from
/// a move source reaches the board and is rejected there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub row: i32,
    pub col: i32,
}

impl Move {
    pub fn new(player: Player, row: i32, col: i32) -> Self {
        Self { player, row, col }
    }
}

/// Game status. `Won` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress { to_move: Player },
    Won { winner: Player },
}

// ============================================================================
// GAME STATE
// ============================================================================

/// A single game: board, incremental win tracker and move history
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    links: Connectivity,
    status: GameStatus,
    moves: Vec<Move>,
}

impl Game {
    /// New game on an empty board, X to move
    pub fn new(size: usize) -> Result<Self> {
        let board = Board::new(size)?;
        Ok(Self {
            links: Connectivity::new(size),
            board,
            status: GameStatus::InProgress { to_move: Player::X },
            moves: Vec::new(),
        })
    }

    /// Resume from an existing position
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut links = Connectivity::from_board(&board);
        let status = Player::ALL
            .into_iter()
            .find(|&p| links.is_connected(p))
            .map(|winner| GameStatus::Won { winner })
            .unwrap_or(GameStatus::InProgress { to_move });

        Self {
            board,
            links,
            status,
            moves: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Player to move, `None` once the game is over
    pub fn to_move(&self) -> Option<Player> {
        match self.status {
            GameStatus::InProgress { to_move } => Some(to_move),
            GameStatus::Won { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::InProgress { .. } => None,
            GameStatus::Won { winner } => Some(winner),
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Moves accepted so far, in order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The winner's chain, once there is one
    pub fn winning_path(&self) -> Option<Vec<(usize, usize)>> {
        self.winner().and_then(|p| winning_path(&self.board, p))
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Validate, apply and check for a win. A rejected move changes nothing.
    pub fn play(&mut self, player: Player, row: i32, col: i32) -> Result<GameStatus> {
        let to_move = match self.status {
            GameStatus::Won { winner } => return Err(HexError::GameOver { winner }),
            GameStatus::InProgress { to_move } => to_move,
        };
        if player != to_move {
            return Err(HexError::OutOfTurn {
                expected: to_move,
                actual: player,
            });
        }

        self.board.place(player, row, col)?;
        self.links.record(&self.board, row as usize, col as usize)?;
        self.moves.push(Move::new(player, row, col));

        self.status = if self.links.is_connected(player) {
            GameStatus::Won { winner: player }
        } else {
            GameStatus::InProgress {
                to_move: player.opponent(),
            }
        };
        Ok(self.status)
    }

    pub fn apply(&mut self, mv: Move) -> Result<GameStatus> {
        self.play(mv.player, mv.row, mv.col)
    }
}

// ============================================================================
// TESTS
// ============================================================================
