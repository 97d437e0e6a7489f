//! Per-user score counters, updated when a game ends.

use async_trait::async_trait;

use crate::domain::state::UserId;
use crate::errors::domain::DomainError;

#[async_trait]
pub trait ScoreRecorder: Send + Sync {
    async fn increment_rounds_played(&self, user_id: UserId) -> Result<(), DomainError>;

    async fn increment_wins(&self, user_id: UserId) -> Result<(), DomainError>;
}
