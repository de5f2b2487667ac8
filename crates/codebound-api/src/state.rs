//! Shared application state.

use std::sync::Arc;

use codebound_core::clock::Clock;
use codebound_core::error::DomainError;
use codebound_core::repository::SaveRepository;
use codebound_core::rng::RngSource;
use codebound_session::application::dispatcher::GameEngine;
use codebound_session::application::store::SessionStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Action dispatcher.
    pub engine: Arc<GameEngine>,
    /// One live game and random stream per user.
    pub sessions: Arc<SessionStore>,
    /// Durable save records.
    pub saves: Arc<dyn SaveRepository>,
    /// Clock for save timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the story graph fails its
    /// start-up check.
    pub fn new(
        clock: Arc<dyn Clock>,
        rng_source: Arc<dyn RngSource>,
        saves: Arc<dyn SaveRepository>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            engine: Arc::new(GameEngine::new(Arc::clone(&clock))?),
            sessions: Arc::new(SessionStore::new(rng_source)),
            saves,
            clock,
        })
    }
}
