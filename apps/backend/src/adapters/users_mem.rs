//! In-memory adapter for users and their score counters.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use crate::auth::password::{validate_password, PasswordHashing};
use crate::domain::state::UserId;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::scores::ScoreRecorder;
use crate::repos::users::{leaderboard_from, validate_username, LeaderboardEntry, User, UserStore};

#[derive(Debug)]
pub struct InMemoryUserStore {
    next_id: AtomicI64,
    users: DashMap<UserId, User>,
    /// Lowercased username -> id; the entry API makes name claims atomic.
    names: DashMap<String, UserId>,
    hashing: PasswordHashing,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_hashing(PasswordHashing::default())
    }

    pub fn with_hashing(hashing: PasswordHashing) -> Self {
        Self {
            next_id: AtomicI64::new(1),
            users: DashMap::new(),
            names: DashMap::new(),
            hashing,
        }
    }

    fn update<F>(&self, user_id: UserId, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut User),
    {
        let mut user = self.users.get_mut(&user_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
        })?;
        f(user.value_mut());
        Ok(())
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let username = validate_username(username)?;
        validate_password(password)?;
        // hashed before the name is claimed; a failed hash must not reserve it
        let password_hash = self.hashing.hash(password)?;

        let id = match self.names.entry(username.to_lowercase()) {
            Entry::Occupied(_) => {
                return Err(DomainError::conflict(
                    ConflictKind::UsernameTaken,
                    format!("Username '{username}' is already taken"),
                ))
            }
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(id);
                id
            }
        };

        let user = User {
            id,
            username,
            password_hash,
            wins: 0,
            rounds_played: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let id = match self.names.get(&username.trim().to_lowercase()) {
            Some(id) => *id,
            None => return Ok(None),
        };
        let Some(user) = self.users.get(&id).map(|u| u.value().clone()) else {
            return Ok(None);
        };
        // no map guard is held while Argon2 runs
        Ok(self
            .hashing
            .verify(password, &user.password_hash)
            .then_some(user))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let users = self.users.iter().map(|u| u.value().clone()).collect();
        Ok(leaderboard_from(users))
    }
}

#[async_trait]
impl ScoreRecorder for InMemoryUserStore {
    async fn increment_rounds_played(&self, user_id: UserId) -> Result<(), DomainError> {
        self.update(user_id, |u| u.rounds_played += 1)
    }

    async fn increment_wins(&self, user_id: UserId) -> Result<(), DomainError> {
        self.update(user_id, |u| u.wins += 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::ValidationKind;

    fn store() -> InMemoryUserStore {
        InMemoryUserStore::with_hashing(PasswordHashing::low_cost())
    }

    #[tokio::test]
    async fn usernames_are_unique_ignoring_case() {
        let store = store();
        let alice = store.create_user("Alice", "secret1").await.unwrap();
        assert_eq!(alice.username, "Alice");

        let err = store.create_user("alice", "secret2").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::UsernameTaken, _)
        ));
    }

    #[tokio::test]
    async fn counters_feed_the_leaderboard() {
        let store = store();
        let a = store.create_user("a", "pass").await.unwrap();
        let b = store.create_user("b", "pass").await.unwrap();

        store.increment_rounds_played(a.id).await.unwrap();
        store.increment_rounds_played(b.id).await.unwrap();
        store.increment_wins(b.id).await.unwrap();

        let board = store.leaderboard().await.unwrap();
        assert_eq!(board[0].username, "b");
        assert_eq!(board[0].wins, 1);
        assert_eq!(board[1].rounds_played, 1);
    }

    #[tokio::test]
    async fn scoring_an_unknown_user_is_not_found() {
        let store = store();
        assert!(matches!(
            store.increment_wins(42).await,
            Err(DomainError::NotFound(NotFoundKind::User, _))
        ));
    }

    #[tokio::test]
    async fn credentials_verify_against_the_stored_hash() {
        let store = store();
        let bob = store.create_user("Bob", "correct horse").await.unwrap();
        assert_ne!(bob.password_hash, "correct horse");

        let found = store
            .verify_credentials("bob", "correct horse")
            .await
            .unwrap()
            .expect("case-insensitive name with the right password");
        assert_eq!(found.id, bob.id);

        assert!(store
            .verify_credentials("Bob", "wrong horse")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .verify_credentials("nobody", "correct horse")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn a_rejected_password_does_not_claim_the_name() {
        let store = store();
        assert!(matches!(
            store.create_user("carol", "abc").await,
            Err(DomainError::Validation(ValidationKind::InvalidPassword, _))
        ));
        store.create_user("carol", "abcd").await.unwrap();
    }
}
