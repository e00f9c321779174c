//! Move sources: collaborators that propose moves for a player
//!
//! ## Architecture
//! - Level 2: `play_out` drives a game between two sources
//! - Level 3: `RandomMoveSource` picks uniformly among empty cells

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Player};
use crate::error::{HexError, Result};
use crate::game::{Game, Move};

/// Anything that can propose a move for `player` on `board`
pub trait MoveSource {
    /// Propose a move, or `None` if there is nothing to play
    fn propose(&mut self, board: &Board, player: Player) -> Option<Move>;
}

// ============================================================================
// RANDOM SOURCE
// ============================================================================

/// Non-strategic computer opponent
#[derive(Clone, Debug)]
pub struct RandomMoveSource {
    rng: ChaCha8Rng,
}

impl RandomMoveSource {
    /// Reproducible source from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl MoveSource for RandomMoveSource {
    fn propose(&mut self, board: &Board, player: Player) -> Option<Move> {
        let empty: Vec<(usize, usize)> = board.empty_cells().collect();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[self.rng.gen_range(0..empty.len())];
        Some(Move::new(player, row as i32, col as i32))
    }
}

// ============================================================================
// PLAY-OUT
// ============================================================================

/// Play `game` to the end, asking `x` and `o` for moves in turn.
/// Returns the winner.
///
/// Rejected proposals are re-requested; a source that keeps proposing
/// illegal moves is retried up to `board.size()^2` times before giving up.
pub fn play_out(game: &mut Game, x: &mut dyn MoveSource, o: &mut dyn MoveSource) -> Result<Player> {
    while let Some(player) = game.to_move() {
        let source: &mut dyn MoveSource = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        request_legal_move(game, source, player)?;
    }

    game.winner()
        .ok_or_else(|| HexError::InvalidQuery("game ended without a winner".to_string()))
}

fn request_legal_move(game: &mut Game, source: &mut dyn MoveSource, player: Player) -> Result<()> {
    let attempts = game.size() * game.size();
    let mut last_err = None;

    for _ in 0..attempts.max(1) {
        let mv = source
            .propose(game.board(), player)
            .ok_or_else(|| HexError::InvalidQuery(format!("no move available for {}", player)))?;
        match game.apply(mv) {
            Ok(_) => return Ok(()),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| HexError::InvalidQuery("no move proposed".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script, then gives up
    struct Scripted(Vec<(i32, i32)>);

    impl MoveSource for Scripted {
        fn propose(&mut self, _board: &Board, player: Player) -> Option<Move> {
            if self.0.is_empty() {
                return None;
            }
            let (row, col) = self.0.remove(0);
            Some(Move::new(player, row, col))
        }
    }

    #[test]
    fn test_random_source_picks_empty_cells() {
        let mut board = Board::from_rows(["XO.", "OX.", "XOX"]).unwrap();
        let mut source = RandomMoveSource::new(3);
        for _ in 0..20 {
            let mv = source.propose(&board, Player::O).unwrap();
            assert_eq!(mv.col, 2);
            assert!(mv.row < 2);
        }
        board.place(Player::O, 0, 2).unwrap();
        board.place(Player::O, 1, 2).unwrap();
        assert!(source.propose(&board, Player::X).is_none());
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let mut a = Game::new(7).unwrap();
        let mut b = Game::new(7).unwrap();
        let wa = play_out(&mut a, &mut RandomMoveSource::new(1), &mut RandomMoveSource::new(2)).unwrap();
        let wb = play_out(&mut b, &mut RandomMoveSource::new(1), &mut RandomMoveSource::new(2)).unwrap();
        assert_eq!(wa, wb);
        assert_eq!(a.moves(), b.moves());
    }

    #[test]
    fn test_play_out_retries_illegal_proposals() {
        let mut game = Game::new(2).unwrap();
        // X tries off-board first, then the column win
        let mut x = Scripted(vec![(0, -1), (0, 0), (1, 0)]);
        let mut o = Scripted(vec![(0, 0), (1, 1)]);
        let winner = play_out(&mut game, &mut x, &mut o).unwrap();
        assert_eq!(winner, Player::X);
        assert_eq!(game.moves().len(), 3);
    }

    #[test]
    fn test_play_out_reports_exhausted_source() {
        let mut game = Game::new(3).unwrap();
        let mut x = Scripted(vec![(1, 1)]);
        let mut o = RandomMoveSource::new(9);
        assert!(play_out(&mut game, &mut x, &mut o).is_err());
    }
}
