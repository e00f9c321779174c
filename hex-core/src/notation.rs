//! Board notation: the size, then `size * size` cell symbols in row-major
//! order.
//!
//! ```text
//! 3 .X. ... O..
//! ```
//!
//! Whitespace between symbols is ignored when parsing.

use std::str::FromStr;

use crate::board::{check_size, Board, Cell};
use crate::error::{HexError, Result};

impl Board {
    /// Compact notation, one space between the size and each row
    pub fn to_notation(&self) -> String {
        let mut out = self.size().to_string();
        for row in self.rows() {
            out.push(' ');
            out.extend(row.iter().map(|cell| cell.symbol()));
        }
        out
    }

    pub fn from_notation(s: &str) -> Result<Self> {
        let s = s.trim();
        let (size, rest) = s
            .split_once(char::is_whitespace)
            .unwrap_or((s, ""));
        let size: usize = size
            .parse()
            .map_err(|_| HexError::Parse(format!("bad size {:?}", size)))?;
        check_size(size)?;

        let cells = rest
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Cell::from_symbol(c).map_err(|_| HexError::Parse(format!("bad symbol {:?}", c))))
            .collect::<Result<Vec<_>>>()?;

        if cells.len() != size * size {
            return Err(HexError::Parse(format!(
                "expected {} cells, found {}",
                size * size,
                cells.len()
            )));
        }

        Board::from_cells(size, cells)
    }
}

impl FromStr for Board {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_notation(s)
    }
}

impl TryFrom<String> for Board {
    type Error = HexError;

    fn try_from(s: String) -> Result<Self> {
        Board::from_notation(&s)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_notation()
    }
}
