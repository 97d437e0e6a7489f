//! Game flow service: validates and applies player actions against session state.
//!
//! Every mutation of a session runs inside that session's critical section
//! (`SessionLocks`). Transitions load their own state from the store; callers
//! only provide the acting user and the parsed action.

mod lobby;
mod player_actions;
mod round_lifecycle;
mod voting;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{ScoreRecorder, SessionStore, WordProvider};
use crate::services::broadcast::ActionBroadcaster;
use crate::services::session_locks::SessionLocks;
use crate::services::voting_registry::VotingRegistry;

pub struct GameFlowService {
    config: GameConfig,
    sessions: Arc<dyn SessionStore>,
    words: Arc<dyn WordProvider>,
    scores: Arc<dyn ScoreRecorder>,
    broadcaster: Arc<dyn ActionBroadcaster>,
    locks: SessionLocks,
    voting: VotingRegistry,
    /// Role dealing and tie-breaks. Never held across an await.
    rng: Mutex<StdRng>,
}

impl GameFlowService {
    pub fn new(
        config: GameConfig,
        sessions: Arc<dyn SessionStore>,
        words: Arc<dyn WordProvider>,
        scores: Arc<dyn ScoreRecorder>,
        broadcaster: Arc<dyn ActionBroadcaster>,
    ) -> Self {
        Self {
            config,
            sessions,
            words,
            scores,
            broadcaster,
            locks: SessionLocks::new(),
            voting: VotingRegistry::new(),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic role dealing and tie-breaks, for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether `token` currently has an open voting round.
    pub fn voting_open(&self, token: &str) -> bool {
        self.voting.is_open(token)
    }

    /// Number of session locks currently allocated.
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Tokens that name no session must not keep a lock entry alive.
    /// Call after the guard has been dropped.
    fn forget_lock_if_missing<T>(&self, token: &str, result: &Result<T, DomainError>) {
        if matches!(result, Err(DomainError::NotFound(NotFoundKind::Session, _))) {
            self.locks.forget(token);
        }
    }
}
