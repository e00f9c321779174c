//! Server state management
//!
//! Every game lives behind its own mutex, so a move request holds exactly one
//! lock for validate → apply → check-win. Independent games never contend
//! beyond the brief map lookup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use hex_core::{Game, RandomMoveSource};
use rustc_hash::FxHashMap;

pub type GameId = u64;

/// One hosted game and its computer opponent
#[derive(Debug)]
pub struct GameSession {
    pub game: Game,
    pub computer: RandomMoveSource,
}

pub type SharedSession = Arc<Mutex<GameSession>>;

/// Server-wide shared state
pub struct ServerState {
    games: RwLock<FxHashMap<GameId, SharedSession>>,
    next_id: AtomicU64,
    /// Board size for games created without an explicit size
    pub default_size: usize,
    /// Base seed for computer opponents (None = entropy)
    pub seed: Option<u64>,
}

impl ServerState {
    pub fn new(default_size: usize, seed: Option<u64>) -> Self {
        Self {
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            default_size,
            seed,
        }
    }

    /// Register a new game and return its id
    pub fn insert(&self, game: Game) -> GameId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let computer = match self.seed {
            Some(seed) => RandomMoveSource::new(seed.wrapping_add(id)),
            None => RandomMoveSource::from_entropy(),
        };
        let session = Arc::new(Mutex::new(GameSession { game, computer }));
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session);
        id
    }

    pub fn get(&self, id: GameId) -> Option<SharedSession> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn remove(&self, id: GameId) -> bool {
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    /// Ids of all hosted games, ascending
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(hex_core::DEFAULT_SIZE, None)
    }
}

/// Lock a session. A panic in another request cannot leave a `Game`
/// half-updated (moves are applied atomically), so poisoning is ignored.
pub fn lock(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
