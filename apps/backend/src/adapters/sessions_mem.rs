//! In-memory adapter for the session repository.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::state::{Player, Session};
use crate::errors::domain::DomainError;
use crate::repos::sessions::SessionStore;

/// DashMap-backed implementation of SessionStore.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
    /// Players per session token, in join order.
    players: DashMap<String, Vec<Player>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.get(token).map(|s| s.value().clone()))
    }

    async fn load_players(&self, token: &str) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .players
            .get(token)
            .map(|p| p.value().clone())
            .unwrap_or_default())
    }

    async fn save_session(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn save_player(&self, player: &Player) -> Result<(), DomainError> {
        let mut seated = self.players.entry(player.session_token.clone()).or_default();
        match seated.iter_mut().find(|p| p.user_id == player.user_id) {
            Some(existing) => *existing = player.clone(),
            None => seated.push(player.clone()),
        }
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.remove(token);
        self.players.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[tokio::test]
    async fn save_player_upserts_by_user() {
        let store = InMemorySessionStore::new();
        store.save_player(&Player::new(1, "a", "tok")).await.unwrap();
        store.save_player(&Player::new(2, "b", "tok")).await.unwrap();

        let mut updated = Player::new(1, "a", "tok");
        updated.given_hint = Some("red".into());
        store.save_player(&updated).await.unwrap();

        let players = store.load_players("tok").await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0], updated);
    }

    #[tokio::test]
    async fn delete_removes_session_and_players() {
        let store = InMemorySessionStore::new();
        let session = Session::new("tok", 1, datetime!(2024-05-01 12:00 UTC));
        store.save_session(&session).await.unwrap();
        store.save_player(&Player::new(1, "a", "tok")).await.unwrap();

        store.delete_session("tok").await.unwrap();
        assert!(store.load_by_token("tok").await.unwrap().is_none());
        assert!(store.load_players("tok").await.unwrap().is_empty());
        // second delete is a no-op
        store.delete_session("tok").await.unwrap();
    }
}
