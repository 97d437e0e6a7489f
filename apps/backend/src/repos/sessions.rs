//! Session repository contract.

use async_trait::async_trait;

use crate::domain::state::{Player, Session};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Persistence of session and player records.
///
/// Implementations only store what they are given; every rule lives in the
/// game flow service.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;

    /// Players of a session in join order.
    async fn load_players(&self, token: &str) -> Result<Vec<Player>, DomainError>;

    async fn save_session(&self, session: &Session) -> Result<(), DomainError>;

    /// Insert or replace the player identified by `(session_token, user_id)`.
    async fn save_player(&self, player: &Player) -> Result<(), DomainError>;

    /// Delete a session and all of its players. Deleting a missing session is a no-op.
    async fn delete_session(&self, token: &str) -> Result<(), DomainError>;
}

pub async fn require_session(
    store: &dyn SessionStore,
    token: &str,
) -> Result<Session, DomainError> {
    store.load_by_token(token).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Session, format!("Session {token} not found"))
    })
}
