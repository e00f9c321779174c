//! Error types for board, connectivity and game operations

use crate::board::Player;

/// Rejection reasons returned by the core
///
/// Every variant is recoverable: a move source that receives one is expected
/// to retry with a corrected move. None of them invalidate the game instance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("invalid player {0:?}")]
    InvalidPlayer(char),

    #[error("move ({row},{col}) is off the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    #[error("move ({row},{col}) is already taken")]
    CellOccupied { row: usize, col: usize },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid board size: {0}")]
    InvalidSize(String),

    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: Player, actual: Player },

    #[error("game is over, {winner} has already won")]
    GameOver { winner: Player },

    #[error("malformed board notation: {0}")]
    Parse(String),
}

impl HexError {
    /// Stable reason code, used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            HexError::InvalidPlayer(_) => "InvalidPlayer",
            HexError::OutOfBounds { .. } => "OutOfBounds",
            HexError::CellOccupied { .. } => "CellOccupied",
            HexError::InvalidQuery(_) => "InvalidQuery",
            HexError::InvalidSize(_) => "InvalidSize",
            HexError::OutOfTurn { .. } => "OutOfTurn",
            HexError::GameOver { .. } => "GameOver",
            HexError::Parse(_) => "Parse",
        }
    }
}

pub type Result<T> = std::result::Result<T, HexError>;
