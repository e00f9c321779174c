//! Win detection: reachability between a player's two sides
//!
//! The graph is implicit. Nodes are the `size * size` cells (row-major index)
//! followed by one sentinel per side. An edge is traversable when both ends
//! belong to the player being tested; a side node belongs to its owner.
//!
//! Two implementations answer the same question:
//! - `has_connected` searches from scratch (breadth-first)
//! - `Connectivity` tracks components incrementally with a disjoint-set

use std::collections::VecDeque;

use crate::board::{neighbors, side_contacts, Board, Cell, Player, Side};
use crate::error::{HexError, Result};
use crate::union_find::DisjointSet;

/// Number of virtual side nodes
pub const SIDE_COUNT: usize = 4;

/// A node of the connectivity graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Cell(usize),
    Side(Side),
}

impl Node {
    /// Arena index on a board of the given size
    pub fn index(self, size: usize) -> usize {
        match self {
            Node::Cell(idx) => idx,
            Node::Side(side) => size * size + side.offset(),
        }
    }

    /// Inverse of `index`; `index` must be below `size * size + SIDE_COUNT`
    pub(crate) fn from_index(size: usize, index: usize) -> Self {
        let cells = size * size;
        if index < cells {
            Node::Cell(index)
        } else {
            Node::Side(Side::ALL[index - cells])
        }
    }
}

// ============================================================================
// FROM-SCRATCH SEARCH
// ============================================================================

/// Has `player` linked their two sides?
pub fn has_connected(board: &Board, player: Player) -> bool {
    search(board, player).is_some()
}

/// `has_connected` for a raw player symbol
pub fn has_connected_symbol(board: &Board, symbol: char) -> Result<bool> {
    let player = Player::from_symbol(symbol)?;
    Ok(has_connected(board, player))
}

/// Cells of a chain linking `player`'s sides, start side first
pub fn winning_path(board: &Board, player: Player) -> Option<Vec<(usize, usize)>> {
    let path = search(board, player)?;
    Some(
        path.into_iter()
            .filter_map(|node| match Node::from_index(board.size(), node) {
                Node::Cell(idx) => Some(board.coords(idx)),
                Node::Side(_) => None,
            })
            .collect(),
    )
}

/// Breadth-first search from the start side. Returns the node path to the
/// end side if one exists.
fn search(board: &Board, player: Player) -> Option<Vec<usize>> {
    let size = board.size();
    let (start, goal) = player.sides();
    let start = Node::Side(start).index(size);
    let goal = Node::Side(goal).index(size);

    let node_count = size * size + SIDE_COUNT;
    let mut parent: Vec<Option<usize>> = vec![None; node_count];
    let mut visited = vec![false; node_count];
    let mut queue = VecDeque::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        if node == goal {
            return Some(trace_back(&parent, goal));
        }
        visit_traversable(board, player, node, |next| {
            if !visited[next] {
                visited[next] = true;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        });
    }

    None
}

fn trace_back(parent: &[Option<usize>], goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut node = goal;
    while let Some(prev) = parent[node] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Call `visit` for each node reachable from `node` in one step over
/// `player`'s stones
fn visit_traversable(board: &Board, player: Player, node: usize, mut visit: impl FnMut(usize)) {
    let size = board.size();
    let owned = |r: usize, c: usize| board.cell(r, c) == Cell::Stone(player);

    match Node::from_index(size, node) {
        Node::Side(side) => {
            side.cells(size)
                .filter(|&(r, c)| owned(r, c))
                .for_each(|(r, c)| visit(board.index(r, c)));
        }
        Node::Cell(idx) => {
            let (row, col) = board.coords(idx);
            neighbors(size, row, col)
                .filter(|&(r, c)| owned(r, c))
                .for_each(|(r, c)| visit(board.index(r, c)));
            side_contacts(size, row, col)
                .filter(|side| side.owner() == player)
                .for_each(|side| visit(Node::Side(side).index(size)));
        }
    }
}

// ============================================================================
// INCREMENTAL TRACKER
// ============================================================================

/// Incremental connectivity over a growing board
///
/// Feed it every stone as it is placed; each `record` merges the stone with
/// its same-colored neighbours and with its owner's sides.
#[derive(Clone, Debug)]
pub struct Connectivity {
    size: usize,
    sets: DisjointSet,
}

impl Connectivity {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            sets: DisjointSet::new(size * size + SIDE_COUNT),
        }
    }

    /// Tracker for every stone already on `board`
    pub fn from_board(board: &Board) -> Self {
        let mut links = Self::new(board.size());
        for row in 0..board.size() {
            for col in 0..board.size() {
                links.link(board, row, col);
            }
        }
        links
    }

    /// Account for the stone at (row, col). Empty cells are ignored.
    pub fn record(&mut self, board: &Board, row: usize, col: usize) -> Result<()> {
        if board.size() != self.size {
            return Err(HexError::InvalidQuery(format!(
                "{}x{} board given to a {}x{} tracker",
                board.size(),
                board.size(),
                self.size,
                self.size
            )));
        }
        if row >= self.size || col >= self.size {
            return Err(HexError::InvalidQuery(format!(
                "cell ({},{}) is off the {}x{} board",
                row, col, self.size, self.size
            )));
        }
        self.link(board, row, col);
        Ok(())
    }

    fn link(&mut self, board: &Board, row: usize, col: usize) {
        let Cell::Stone(player) = board.cell(row, col) else {
            return;
        };

        let here = board.index(row, col);
        for (r, c) in neighbors(self.size, row, col) {
            if board.cell(r, c) == Cell::Stone(player) {
                self.sets.union(here, board.index(r, c));
            }
        }
        for side in side_contacts(self.size, row, col) {
            if side.owner() == player {
                self.sets.union(here, Node::Side(side).index(self.size));
            }
        }
    }

    pub fn is_connected(&mut self, player: Player) -> bool {
        let (start, goal) = player.sides();
        self.sets.connected(
            Node::Side(start).index(self.size),
            Node::Side(goal).index(self.size),
        )
    }
}
