//! User repository contract and leaderboard ranking.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::state::UserId;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_USERNAME_LEN: usize = 32;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2id PHC string, never serialized.
    pub password_hash: String,
    pub wins: u32,
    pub rounds_played: u32,
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    pub wins: u32,
    pub rounds_played: u32,
    pub win_rate: f64,
}

impl From<&User> for LeaderboardEntry {
    fn from(user: &User) -> Self {
        let win_rate = if user.rounds_played == 0 {
            0.0
        } else {
            f64::from(user.wins) / f64::from(user.rounds_played)
        };
        Self {
            username: user.username.clone(),
            wins: user.wins,
            rounds_played: user.rounds_played,
            win_rate,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `UsernameTaken` if the name exists (case-insensitive).
    async fn create_user(&self, username: &str, password: &str) -> Result<User, DomainError>;

    /// `None` for an unknown username and for a wrong password alike.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// All users, ranked.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, DomainError>;
}

/// Usernames are 1..=32 ASCII letters, digits or underscores.
pub fn validate_username(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let ok = !name.is_empty()
        && name.len() <= MAX_USERNAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !ok {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!(
                "Username must be 1-{MAX_USERNAME_LEN} characters of letters, digits or '_'"
            ),
        ));
    }
    Ok(name.to_string())
}

/// Wins desc, then rounds played desc, then username.
pub fn rank_users(users: &mut [User]) {
    users.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.rounds_played.cmp(&a.rounds_played))
            .then_with(|| a.username.cmp(&b.username))
    });
}

pub fn leaderboard_from(mut users: Vec<User>) -> Vec<LeaderboardEntry> {
    rank_users(&mut users);
    users.iter().map(LeaderboardEntry::from).collect()
}
