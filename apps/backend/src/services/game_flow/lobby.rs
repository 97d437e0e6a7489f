use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::state::{Player, Session, UserId};
use crate::errors::domain::{DomainError, ForbiddenKind, ValidationKind};
use crate::protocol::views::SessionView;
use crate::repos::require_session;

impl GameFlowService {
    /// Create a session owned by `creator_id`, who takes the first seat.
    pub async fn create_session(
        &self,
        creator_id: UserId,
        creator_username: &str,
    ) -> Result<Session, DomainError> {
        let token = Uuid::new_v4().to_string();
        let session = Session::new(token.clone(), creator_id, OffsetDateTime::now_utc());

        let _guard = self.locks.acquire(&token).await;
        self.sessions.save_session(&session).await?;
        self.sessions
            .save_player(&Player::new(creator_id, creator_username, token.as_str()))
            .await?;

        info!(token = %token, creator_id, "Session created");
        Ok(session)
    }

    /// Seat a user in a session. Joining twice returns the existing seat.
    pub async fn join_session(
        &self,
        token: &str,
        user_id: UserId,
        username: &str,
    ) -> Result<Player, DomainError> {
        let result = {
            let _guard = self.locks.acquire(token).await;
            self.seat_player(token, user_id, username).await
        };
        self.forget_lock_if_missing(token, &result);
        result
    }

    async fn seat_player(
        &self,
        token: &str,
        user_id: UserId,
        username: &str,
    ) -> Result<Player, DomainError> {
        let session = require_session(self.sessions.as_ref(), token).await?;
        let players = self.sessions.load_players(token).await?;
        let seated = players.len();

        if let Some(existing) = players.into_iter().find(|p| p.user_id == user_id) {
            return Ok(existing);
        }
        if session.state.has_started() {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "The game has already started",
            ));
        }
        if seated >= self.config.max_players {
            return Err(DomainError::validation(
                ValidationKind::SessionFull,
                format!("Session is full ({} players)", self.config.max_players),
            ));
        }

        let player = Player::new(user_id, username, token);
        self.sessions.save_player(&player).await?;
        info!(token, user_id, seated = seated + 1, "Player joined");
        Ok(player)
    }

    /// The session as seen by one of its players.
    pub async fn session_view(
        &self,
        token: &str,
        viewer_id: UserId,
    ) -> Result<SessionView, DomainError> {
        let session = require_session(self.sessions.as_ref(), token).await?;
        let players = self.sessions.load_players(token).await?;
        if !players.iter().any(|p| p.user_id == viewer_id) {
            return Err(not_a_member());
        }
        Ok(SessionView::build(&session, &players, viewer_id))
    }

    /// Fails unless `user_id` is seated in the session.
    pub async fn ensure_member(&self, token: &str, user_id: UserId) -> Result<(), DomainError> {
        require_session(self.sessions.as_ref(), token).await?;
        let players = self.sessions.load_players(token).await?;
        if players.iter().any(|p| p.user_id == user_id) {
            Ok(())
        } else {
            Err(not_a_member())
        }
    }
}

fn not_a_member() -> DomainError {
    DomainError::forbidden(ForbiddenKind::NotAMember, "You are not a player of this session")
}
