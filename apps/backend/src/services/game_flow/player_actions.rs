use std::sync::Arc;

use tracing::{debug, info, warn};

use super::GameFlowService;
use crate::domain::state::UserId;
use crate::errors::domain::{DomainError, ForbiddenKind, ValidationKind};
use crate::protocol::actions::{ActionType, PlayerAction, PlayerActionResult};
use crate::repos::require_session;

impl GameFlowService {
    /// Validate and apply one action sent by `user_id`.
    ///
    /// On error nothing has been mutated. A successful result is published to
    /// the session topic while the session lock is still held, then returned.
    pub async fn handle_action(
        self: &Arc<Self>,
        user_id: UserId,
        action: PlayerAction,
    ) -> Result<PlayerActionResult, DomainError> {
        let PlayerAction {
            token,
            action_type,
            content,
        } = action;
        debug!(token = %token, user_id, action = %action_type, "Handling player action");

        let result = {
            let _guard = self.locks.acquire(&token).await;
            let result = self
                .dispatch(&token, user_id, action_type, content.as_deref())
                .await;
            // published before the guard drops so topic order follows transitions
            if let Ok(res) = &result {
                self.broadcaster.publish(&token, res);
            }
            result
        };
        self.forget_lock_if_missing(&token, &result);

        match &result {
            Ok(res) => info!(
                token = %token,
                user_id,
                action = %action_type,
                outcome = ?res.action_result,
                "Player action applied"
            ),
            Err(err) => warn!(
                token = %token,
                user_id,
                action = %action_type,
                code = %err.code(),
                "Player action rejected"
            ),
        }
        result
    }

    async fn dispatch(
        self: &Arc<Self>,
        token: &str,
        user_id: UserId,
        action_type: ActionType,
        content: Option<&str>,
    ) -> Result<PlayerActionResult, DomainError> {
        let mut session = require_session(self.sessions.as_ref(), token).await?;
        let mut players = self.sessions.load_players(token).await?;

        if !players.iter().any(|p| p.user_id == user_id) {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotAMember,
                "You are not a player of this session",
            ));
        }
        if action_type.requires_creator() && !session.is_creator(user_id) {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotCreator,
                format!("Only the session creator may send {action_type}"),
            ));
        }

        match action_type {
            ActionType::TestAction | ActionType::TestAdminAction => {
                Ok(PlayerActionResult::new(action_type))
            }
            ActionType::StartGame => self.start_game(&mut session, &mut players).await,
            ActionType::GiveHint => {
                self.give_hint(&mut session, &mut players, user_id, content)
                    .await
            }
            ActionType::StartVoting => self.start_voting(&mut session).await,
            ActionType::Vote => {
                self.vote(&mut session, &mut players, user_id, content)
                    .await
            }
            ActionType::ChameleonGuess => {
                self.chameleon_guess(&mut session, &players, user_id, content)
                    .await
            }
            ActionType::NewGame => self.end_session(&session).await,
            ActionType::EndVoting => Err(DomainError::validation(
                ValidationKind::UnknownAction,
                "END_VOTING cannot be sent by clients",
            )),
        }
    }
}
