//! Per-user game state store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use codebound_core::rng::{DeterministicRng, RngSource};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use crate::domain::game_state::GameState;

/// One user's live game and the random stream its actions draw from.
pub struct Session {
    /// The live game.
    pub game: GameState,
    /// Randomness for this user's exploration and combat.
    pub rng: Box<dyn DeterministicRng>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("game", &self.game)
            .finish_non_exhaustive()
    }
}

/// Holds one live `Session` per user.
///
/// Each session sits behind its own mutex, so mutations and random draws
/// for one user are serialized while other users proceed independently.
/// The outer map lock is only held to look up or insert an entry.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    rng_source: Arc<dyn RngSource>,
}

impl SessionStore {
    /// Creates an empty store drawing per-user streams from `rng_source`.
    #[must_use]
    pub fn new(rng_source: Arc<dyn RngSource>) -> Self {
        Self {
            sessions: RwLock::default(),
            rng_source,
        }
    }

    async fn slot(&self, user_id: &str) -> Arc<Mutex<Session>> {
        if let Some(slot) = self.sessions.read().await.get(user_id) {
            return Arc::clone(slot);
        }

        let mut sessions = self.sessions.write().await;
        let slot = sessions.entry(user_id.to_owned()).or_insert_with(|| {
            debug!(user_id, "creating game state");
            Arc::new(Mutex::new(Session {
                game: GameState::new(user_id),
                rng: self.rng_source.rng_for(user_id),
            }))
        });
        Arc::clone(slot)
    }

    /// Locks the user's session, creating a fresh game on first access. The
    /// guard serializes every mutation for that user until it is dropped.
    pub async fn lock(&self, user_id: &str) -> OwnedMutexGuard<Session> {
        self.slot(user_id).await.lock_owned().await
    }

    /// A copy of the user's current state.
    pub async fn snapshot(&self, user_id: &str) -> GameState {
        self.lock(user_id).await.game.clone()
    }

    /// Replaces the user's game wholesale, returning the old one. The
    /// user's random stream carries on.
    pub async fn replace(&self, user_id: &str, state: GameState) -> GameState {
        let mut session = self.lock(user_id).await;
        std::mem::replace(&mut session.game, state)
    }

    /// Discards the user's state and starts a fresh game.
    pub async fn restart(&self, user_id: &str) -> GameState {
        let fresh = GameState::new(user_id);
        self.replace(user_id, fresh.clone()).await;
        debug!(user_id, "game restarted");
        fresh
    }

    /// Number of users with a live state.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no user has a live state.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
