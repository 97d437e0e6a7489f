use std::sync::Arc;

use crate::adapters::{InMemorySessionStore, InMemoryUserStore, StaticWordProvider};
use crate::auth::password::PasswordHashing;
use crate::config::GameConfig;
use crate::error::AppError;
use crate::repos::WordProvider;
use crate::services::GameFlowService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::ws::hub::SessionHub;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    game_config: GameConfig,
    seed: Option<u64>,
    words: Option<Arc<dyn WordProvider>>,
    hashing: PasswordHashing,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            game_config: GameConfig::default(),
            seed: None,
            words: None,
            hashing: PasswordHashing::default(),
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    /// Seed role dealing, tie-breaks and word draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_words(mut self, words: Arc<dyn WordProvider>) -> Self {
        self.words = Some(words);
        self
    }

    pub fn with_password_hashing(mut self, hashing: PasswordHashing) -> Self {
        self.hashing = hashing;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        self.game_config.validate()?;

        let hub = Arc::new(SessionHub::new());
        let users = Arc::new(InMemoryUserStore::with_hashing(self.hashing));
        let words: Arc<dyn WordProvider> = match (self.words, self.seed) {
            (Some(words), _) => words,
            (None, Some(seed)) => Arc::new(StaticWordProvider::seeded(seed)),
            (None, None) => Arc::new(StaticWordProvider::new()),
        };

        let mut game_flow = GameFlowService::new(
            self.game_config,
            Arc::new(InMemorySessionStore::new()),
            words,
            users.clone(),
            hub.clone(),
        );
        if let Some(seed) = self.seed {
            game_flow = game_flow.with_seed(seed);
        }

        Ok(AppState::new(
            self.security_config,
            Arc::new(game_flow),
            users,
            hub,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let state = build_state().build().unwrap();
        assert_eq!(state.game_flow.config(), &GameConfig::default());
    }

    #[test]
    fn rejects_inconsistent_game_config() {
        let config = GameConfig::default().with_min_players(9);
        assert!(matches!(
            build_state().with_game_config(config).build(),
            Err(AppError::Config { .. })
        ));
    }
}
