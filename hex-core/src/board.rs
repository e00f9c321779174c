//! Hex board geometry and cell occupancy
//!
//! The board is a `size x size` rhombus addressed by (row, col). Row 0 is the
//! top edge; each row is shifted half a cell to the right of the one above, so
//! a cell touches up to six neighbours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};

/// Standard tournament board size
pub const DEFAULT_SIZE: usize = 11;

/// Largest board accepted by `Board::new`
pub const MAX_SIZE: usize = 32;

/// Symbol of an empty cell
pub const EMPTY_SYMBOL: char = '.';

/// Neighbour offsets in (row, col)
/// Index: 0=W, 1=E, 2=NW, 3=NE, 4=SW, 5=SE
pub const DIRECTIONS: [(i32, i32); 6] = [
    (0, -1),  // W
    (0, 1),   // E
    (-1, 0),  // NW
    (-1, 1),  // NE
    (1, -1),  // SW
    (1, 0),   // SE
];

// ============================================================================
// PLAYERS AND SIDES
// ============================================================================

/// Player color. X moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parse a player symbol (case-insensitive)
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol.to_ascii_uppercase() {
            'X' => Ok(Player::X),
            'O' => Ok(Player::O),
            _ => Err(HexError::InvalidPlayer(symbol)),
        }
    }

    /// The two sides this player must link: X joins top and bottom,
    /// O joins left and right.
    pub fn sides(self) -> (Side, Side) {
        match self {
            Player::X => (Side::Top, Side::Bottom),
            Player::O => (Side::Left, Side::Right),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Player {
    type Error = HexError;

    fn try_from(symbol: char) -> Result<Self> {
        Player::from_symbol(symbol)
    }
}

impl FromStr for Player {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Player::from_symbol(c),
            (Some(c), Some(_)) => Err(HexError::InvalidPlayer(c)),
            (None, _) => Err(HexError::InvalidPlayer(' ')),
        }
    }
}

/// A board edge. Each one is a virtual node in the connectivity graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Player whose chain this side terminates
    pub fn owner(self) -> Player {
        match self {
            Side::Top | Side::Bottom => Player::X,
            Side::Left | Side::Right => Player::O,
        }
    }

    /// Position of this side among the sentinels following the cells
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Does (row, col) lie on this edge of a board of the given size?
    pub fn touches(self, size: usize, row: usize, col: usize) -> bool {
        match self {
            Side::Top => row == 0,
            Side::Bottom => row + 1 == size,
            Side::Left => col == 0,
            Side::Right => col + 1 == size,
        }
    }

    /// All cells along this edge
    pub fn cells(self, size: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..size).map(move |i| match self {
            Side::Top => (0, i),
            Side::Bottom => (size - 1, i),
            Side::Left => (i, 0),
            Side::Right => (i, size - 1),
        })
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Check if (row, col) is on a board of the given size
pub fn in_bounds(size: usize, row: i32, col: i32) -> bool {
    row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size
}

/// On-board neighbours of (row, col), at most six
pub fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        in_bounds(size, r, c).then_some((r as usize, c as usize))
    })
}

/// Sides touched by (row, col). Corner cells touch two, and the single cell
/// of a 1x1 board touches all four.
pub fn side_contacts(size: usize, row: usize, col: usize) -> impl Iterator<Item = Side> {
    Side::ALL
        .into_iter()
        .filter(move |side| side.touches(size, row, col))
}

// ============================================================================
// CELLS
// ============================================================================

/// Occupancy of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Stone(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Stone(player) => player.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        if symbol == EMPTY_SYMBOL {
            Ok(Cell::Empty)
        } else {
            Player::from_symbol(symbol).map(Cell::Stone)
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Cell occupancy grid, row-major
///
/// Stones are permanent: the only mutation is `place`, which fills an empty
/// cell. Serializes as its notation string (see `notation`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Build a board from rows of symbols (`.`, `X`, `O`); whitespace inside
    /// a row is ignored.
    pub fn from_rows<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(Cell::from_symbol)
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;

        let size = rows.len();
        check_size(size)?;
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(HexError::InvalidSize(format!(
                "row {} has {} cells, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a board from a row-major cell vector
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(HexError::InvalidSize(format!(
                "{} cells for a {}x{} board",
                cells.len(),
                size,
                size
            )));
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major index of (row, col)
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Inverse of `index`
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Place a stone for `player`. A rejected move leaves the board untouched.
    pub fn place(&mut self, player: Player, row: i32, col: i32) -> Result<()> {
        if !in_bounds(self.size, row, col) {
            return Err(HexError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }

        let (row, col) = (row as usize, col as usize);
        let idx = self.index(row, col);
        if !self.cells[idx].is_empty() {
            return Err(HexError::CellOccupied { row, col });
        }

        self.cells[idx] = Cell::Stone(player);
        Ok(())
    }

    /// Occupancy of (row, col)
    pub fn occupancy(&self, row: i32, col: i32) -> Result<Cell> {
        if !in_bounds(self.size, row, col) {
            return Err(HexError::InvalidQuery(format!(
                "cell ({},{}) is off the {}x{} board",
                row, col, self.size, self.size
            )));
        }
        Ok(self.cell(row as usize, col as usize))
    }

    /// Occupancy of an in-bounds cell
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| self.coords(idx))
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_SIZE {
        return Err(HexError::InvalidSize(format!(
            "{} (must be between 1 and {})",
            size, MAX_SIZE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_interior() {
        let mut found: Vec<_> = neighbors(5, 2, 2).collect();
        found.sort();
        assert_eq!(found, vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_neighbors_corners() {
        // Acute corners have two neighbours, obtuse corners three
        let mut top_left: Vec<_> = neighbors(5, 0, 0).collect();
        top_left.sort();
        assert_eq!(top_left, vec![(0, 1), (1, 0)]);

        let mut top_right: Vec<_> = neighbors(5, 0, 4).collect();
        top_right.sort();
        assert_eq!(top_right, vec![(0, 3), (1, 3), (1, 4)]);

        assert_eq!(neighbors(5, 4, 4).count(), 2);
        assert_eq!(neighbors(5, 4, 0).count(), 3);
        assert_eq!(neighbors(1, 0, 0).count(), 0);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let size = 6;
        for r in 0..size {
            for c in 0..size {
                for (nr, nc) in neighbors(size, r, c) {
                    assert!(neighbors(size, nr, nc).any(|n| n == (r, c)));
                }
            }
        }
    }

    #[test]
    fn test_side_contacts() {
        let sides: Vec<_> = side_contacts(3, 0, 0).collect();
        assert_eq!(sides, vec![Side::Top, Side::Left]);
        assert_eq!(side_contacts(3, 1, 1).count(), 0);
        assert_eq!(side_contacts(1, 0, 0).count(), 4);
    }

    #[test]
    fn test_player_parsing() {
        assert_eq!(Player::from_symbol('x'), Ok(Player::X));
        assert_eq!("O".parse::<Player>(), Ok(Player::O));
        assert_eq!(Player::try_from('Z'), Err(HexError::InvalidPlayer('Z')));
        assert!("XO".parse::<Player>().is_err());
        assert_eq!(Player::X.opponent(), Player::O);
    }

    #[test]
    fn test_place_twice() {
        let mut board = Board::new(2).unwrap();
        assert_eq!(board.place(Player::X, 0, 0), Ok(()));
        let after_first = board.clone();

        assert_eq!(
            board.place(Player::X, 0, 0),
            Err(HexError::CellOccupied { row: 0, col: 0 })
        );
        assert_eq!(board, after_first);
        assert_eq!(board.occupancy(0, 0), Ok(Cell::Stone(Player::X)));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new(2).unwrap();
        for (row, col) in [(0, -1), (-1, 0), (0, 2), (2, 0), (i32::MAX, 0)] {
            assert!(matches!(
                board.place(Player::O, row, col),
                Err(HexError::OutOfBounds { .. })
            ));
        }
        assert_eq!(board.stone_count(), 0);
    }

    #[test]
    fn test_grid_constructor() {
        let mut board = Board::from_rows([". X", "O ."]).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.occupancy(0, 1), Ok(Cell::Stone(Player::X)));
        assert_eq!(board.occupancy(1, 0), Ok(Cell::Stone(Player::O)));

        assert!(board.place(Player::X, 0, 0).is_ok());
        assert!(board.place(Player::X, 0, 0).is_err());
        assert!(board.place(Player::O, 0, 1).is_err());
        assert!(board.place(Player::X, 0, -1).is_err());
        assert!(board.place(Player::O, 0, 2).is_err());
        assert!(board.place(Player::X, 2, 0).is_err());
        assert!(board.place(Player::O, 1, 1).is_ok());
        assert!(board.is_full());
    }

    #[test]
    fn test_grid_constructor_rejects_bad_input() {
        assert!(matches!(
            Board::from_rows([".X", "O"]),
            Err(HexError::InvalidSize(_))
        ));
        assert_eq!(
            Board::from_rows([".Z", ".."]),
            Err(HexError::InvalidPlayer('Z'))
        );
        assert!(Board::from_rows(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(Board::new(0).is_err());
        assert!(Board::new(MAX_SIZE + 1).is_err());
        assert!(Board::new(1).is_ok());
    }

    #[test]
    fn test_occupancy_query() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.occupancy(2, 2), Ok(Cell::Empty));
        assert!(matches!(board.occupancy(3, 0), Err(HexError::InvalidQuery(_))));
        assert_eq!(board.empty_cells().count(), 9);
    }
}
