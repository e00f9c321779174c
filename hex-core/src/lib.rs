//! HEX Core - Board state and win detection
//!
//! This crate provides the core game logic for Hex:
//! - Board geometry (square grid with hexagonal adjacency)
//! - Stone placement with legality checks
//! - Connectivity engine (breadth-first search and incremental union-find)
//! - Game state machine and move sources
//! - Board notation and text rendering

pub mod board;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod game;
pub mod notation;
pub mod render;
pub mod source;
pub mod union_find;

// Re-exports for convenient access
pub use board::{Board, Cell, Player, Side, DEFAULT_SIZE, DIRECTIONS, MAX_SIZE};
pub use config::HexConfig;
pub use connectivity::{has_connected, has_connected_symbol, winning_path, Connectivity};
pub use error::HexError;
pub use game::{Game, GameStatus, Move};
pub use source::{play_out, MoveSource, RandomMoveSource};
