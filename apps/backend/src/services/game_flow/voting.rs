use std::sync::Arc;

use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use super::round_lifecycle::require_state;
use super::GameFlowService;
use crate::config::SelfVotePolicy;
use crate::domain::outcome::Winner;
use crate::domain::state::{GameState, Player, Session, UserId};
use crate::domain::voting::{pick_accused, VoteVerdict};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::protocol::actions::{ActionOutcome, ActionType, PlayerActionResult};
use crate::protocol::views::unix_millis;
use crate::services::voting_registry::RoundId;

impl GameFlowService {
    pub(super) async fn start_voting(
        self: &Arc<Self>,
        session: &mut Session,
    ) -> Result<PlayerActionResult, DomainError> {
        require_state(session, GameState::ReadyForVoting)?;
        let Some(round) = self.voting.open(&session.token) else {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "A voting round is already open",
            ));
        };

        let now = OffsetDateTime::now_utc();
        session.state = GameState::Voting;
        session.voting_deadline = Some(now + self.config.voting_duration);
        if let Err(err) = self.sessions.save_session(session).await {
            self.voting.cancel(&session.token);
            return Err(err);
        }

        self.schedule_deadline(&session.token, round);
        info!(
            token = %session.token,
            round = %round,
            secs = self.config.voting_duration.as_secs(),
            "Voting opened"
        );

        let content = json!({
            "votingStartTime": unix_millis(now),
            "votingDuration": self.config.voting_duration.as_secs(),
        });
        Ok(PlayerActionResult::new(ActionType::StartVoting).with_content(content.to_string()))
    }

    fn schedule_deadline(self: &Arc<Self>, token: &str, round: RoundId) {
        let service = Arc::clone(self);
        let owned_token = token.to_string();
        let delay = self.config.voting_duration;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            service.on_voting_deadline(&owned_token, round).await;
        });
        self.voting.attach_timer(token, round, task.abort_handle());
    }

    /// Deadline callback: resolve the round unless someone else already did.
    async fn on_voting_deadline(&self, token: &str, round: RoundId) {
        let _guard = self.locks.acquire(token).await;
        if !self.voting.claim_round(token, round) {
            debug!(token, round = %round, "Voting round already resolved");
            return;
        }

        match self.resolve_after_deadline(token).await {
            Ok(Some(result)) => self.broadcaster.publish(token, &result),
            Ok(None) => debug!(token, "Session left voting before the deadline"),
            Err(err) => error!(token, error = %err, "Failed to resolve voting round"),
        }
    }

    async fn resolve_after_deadline(
        &self,
        token: &str,
    ) -> Result<Option<PlayerActionResult>, DomainError> {
        let Some(mut session) = self.sessions.load_by_token(token).await? else {
            return Ok(None);
        };
        if session.state != GameState::Voting {
            return Ok(None);
        }
        let players = self.sessions.load_players(token).await?;
        info!(token, "Voting deadline reached");
        self.resolve_round(&mut session, &players).await.map(Some)
    }

    pub(super) async fn vote(
        &self,
        session: &mut Session,
        players: &mut [Player],
        user_id: UserId,
        content: Option<&str>,
    ) -> Result<PlayerActionResult, DomainError> {
        require_state(session, GameState::Voting)?;

        let name = content.map(str::trim).unwrap_or_default();
        let accused = players
            .iter()
            .find(|p| p.username.eq_ignore_ascii_case(name))
            .map(|p| (p.user_id, p.username.clone()))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownAccused,
                    format!("No player named '{name}' in this session"),
                )
            })?;
        let (accused_id, accused_name) = accused;

        if accused_id == user_id && self.config.self_vote == SelfVotePolicy::Forbidden {
            return Err(DomainError::validation(
                ValidationKind::SelfVote,
                "You cannot vote for yourself",
            ));
        }

        if let Some(voter) = players.iter_mut().find(|p| p.user_id == user_id) {
            voter.accused = Some(accused_id);
            self.sessions.save_player(voter).await?;
        }

        let intermediate = PlayerActionResult::new(ActionType::Vote).with_content(accused_name);
        if !players.iter().all(Player::has_voted) {
            return Ok(intermediate);
        }
        if !self.voting.claim(&session.token) {
            // the deadline got there first
            return Ok(intermediate);
        }
        self.resolve_round(session, players).await
    }

    /// Shared resolution for "everyone voted" and "deadline fired". Callers
    /// must have claimed the round.
    async fn resolve_round(
        &self,
        session: &mut Session,
        players: &[Player],
    ) -> Result<PlayerActionResult, DomainError> {
        let verdict = {
            let mut rng = self.rng.lock();
            pick_accused(players.iter().map(|p| p.accused), &mut *rng)
        };
        session.voting_deadline = None;

        let result = PlayerActionResult::new(ActionType::EndVoting);
        let accused = match verdict {
            VoteVerdict::NoVotes => {
                session.state = GameState::ChameleonWin;
                self.sessions.save_session(session).await?;
                self.record_scores(&session.token, Winner::Chameleon, players)
                    .await;
                return Ok(result.with_outcome(ActionOutcome::ChameleonWon));
            }
            VoteVerdict::Accused(id) => players.iter().find(|p| p.user_id == id).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Accused player {id} is not seated in {}", session.token),
                )
            })?,
        };

        let result = result.with_content(accused.username.clone());
        if accused.is_chameleon {
            session.state = GameState::ChameleonTurn;
            self.sessions.save_session(session).await?;
            info!(token = %session.token, "Chameleon found");
            Ok(result.with_outcome(ActionOutcome::ChameleonFound))
        } else {
            session.state = GameState::ChameleonWin;
            self.sessions.save_session(session).await?;
            self.record_scores(&session.token, Winner::Chameleon, players)
                .await;
            Ok(result.with_outcome(ActionOutcome::ChameleonWon))
        }
    }
}
