use std::sync::Arc;

use tracing::{debug, error, info};

use super::GameFlowService;
use crate::domain::clues::{guess_matches, validate_guess, validate_hint};
use crate::domain::outcome::{score_deltas, Winner};
use crate::domain::roles::assign_roles;
use crate::domain::state::{GameState, Player, Session, UserId};
use crate::errors::domain::{DomainError, ForbiddenKind, InfraErrorKind, ValidationKind};
use crate::protocol::actions::{ActionOutcome, ActionType, PlayerActionResult};

pub(super) fn require_state(session: &Session, expected: GameState) -> Result<(), DomainError> {
    if session.state != expected {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!(
                "Action not allowed in state {:?} (expected {:?})",
                session.state, expected
            ),
        ));
    }
    Ok(())
}

pub(super) fn secret_word(session: &Session) -> Result<&str, DomainError> {
    session.secret_word.as_deref().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Session {} has started without a secret word", session.token),
        )
    })
}

impl GameFlowService {
    pub(super) async fn start_game(
        &self,
        session: &mut Session,
        players: &mut [Player],
    ) -> Result<PlayerActionResult, DomainError> {
        require_state(session, GameState::WaitingForPlayers)?;
        if players.len() < self.config.min_players {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!(
                    "At least {} players are needed, {} joined",
                    self.config.min_players,
                    players.len()
                ),
            ));
        }

        let word = self.words.next_word()?;
        let ids: Vec<UserId> = players.iter().map(|p| p.user_id).collect();
        let setup = {
            let mut rng = self.rng.lock();
            assign_roles(&ids, &mut *rng)?
        };

        for player in players.iter_mut() {
            player.reset_round();
            player.is_chameleon = player.user_id == setup.chameleon;
            self.sessions.save_player(player).await?;
        }

        session.secret_word = Some(word);
        session.turn_order = setup.turn_order;
        session.turn_cursor = 0;
        session.voting_deadline = None;
        session.state = GameState::Started;
        self.sessions.save_session(session).await?;

        info!(
            token = %session.token,
            players = players.len(),
            "Game started"
        );
        Ok(PlayerActionResult::new(ActionType::StartGame))
    }

    pub(super) async fn give_hint(
        &self,
        session: &mut Session,
        players: &mut [Player],
        user_id: UserId,
        content: Option<&str>,
    ) -> Result<PlayerActionResult, DomainError> {
        require_state(session, GameState::Started)?;
        if session.current_turn() != Some(user_id) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "It is not your turn to give a hint",
            ));
        }
        let hint = validate_hint(content, secret_word(session)?)?;

        let player = players
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Turn order of {} names a missing player", session.token),
                )
            })?;
        player.given_hint = Some(hint.clone());
        self.sessions.save_player(player).await?;

        if session.advance_turn() {
            session.state = GameState::ReadyForVoting;
            debug!(token = %session.token, "All hints given");
        }
        self.sessions.save_session(session).await?;

        Ok(PlayerActionResult::new(ActionType::GiveHint).with_content(hint))
    }

    pub(super) async fn chameleon_guess(
        &self,
        session: &mut Session,
        players: &[Player],
        user_id: UserId,
        content: Option<&str>,
    ) -> Result<PlayerActionResult, DomainError> {
        require_state(session, GameState::ChameleonTurn)?;
        let is_chameleon = players
            .iter()
            .any(|p| p.user_id == user_id && p.is_chameleon);
        if !is_chameleon {
            return Err(DomainError::forbidden(
                ForbiddenKind::NotChameleon,
                "Only the chameleon may guess the word",
            ));
        }
        let guess = validate_guess(content)?;

        let (winner, outcome) = if guess_matches(&guess, secret_word(session)?) {
            (Winner::Chameleon, ActionOutcome::ChameleonWin)
        } else {
            (Winner::Players, ActionOutcome::PlayersWin)
        };

        session.state = winner.terminal_state();
        self.sessions.save_session(session).await?;
        self.record_scores(&session.token, winner, players).await;

        Ok(PlayerActionResult::new(ActionType::ChameleonGuess)
            .with_content(guess)
            .with_outcome(outcome))
    }

    /// Cancel any open voting round now and delete the session once the grace
    /// period has passed.
    pub(super) async fn end_session(
        self: &Arc<Self>,
        session: &Session,
    ) -> Result<PlayerActionResult, DomainError> {
        if self.voting.cancel(&session.token) {
            debug!(token = %session.token, "Open voting round cancelled");
        }

        let service = Arc::clone(self);
        let token = session.token.clone();
        let grace = self.config.end_session_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let guard = service.locks.acquire(&token).await;
            service.voting.cancel(&token);
            match service.sessions.delete_session(&token).await {
                Ok(()) => info!(token = %token, "Session deleted"),
                Err(err) => error!(token = %token, error = %err, "Failed to delete session"),
            }
            drop(guard);
            service.locks.forget(&token);
        });

        Ok(PlayerActionResult::new(ActionType::NewGame))
    }

    /// Score bookkeeping for a finished game. Failures are logged and do not
    /// undo the transition.
    pub(super) async fn record_scores(&self, token: &str, winner: Winner, players: &[Player]) {
        for delta in score_deltas(winner, players) {
            if let Err(err) = self.scores.increment_rounds_played(delta.user_id).await {
                error!(token, user_id = delta.user_id, error = %err, "Failed to record round");
                continue;
            }
            if delta.won {
                if let Err(err) = self.scores.increment_wins(delta.user_id).await {
                    error!(token, user_id = delta.user_id, error = %err, "Failed to record win");
                }
            }
        }
        info!(token, ?winner, "Game finished");
    }
}
