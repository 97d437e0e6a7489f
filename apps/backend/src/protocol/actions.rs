//! Wire types for player actions and their broadcast results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Closed set of action types.
///
/// `EndVoting` is outbound only: it tags the result of a voting round and is
/// rejected when a client sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    TestAction,
    TestAdminAction,
    StartGame,
    GiveHint,
    StartVoting,
    Vote,
    ChameleonGuess,
    NewGame,
    EndVoting,
}

impl ActionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionType::TestAction => "TEST_ACTION",
            ActionType::TestAdminAction => "TEST_ADMIN_ACTION",
            ActionType::StartGame => "START_GAME",
            ActionType::GiveHint => "GIVE_HINT",
            ActionType::StartVoting => "START_VOTING",
            ActionType::Vote => "VOTE",
            ActionType::ChameleonGuess => "CHAMELEON_GUESS",
            ActionType::NewGame => "NEW_GAME",
            ActionType::EndVoting => "END_VOTING",
        }
    }

    /// Admin actions only the session creator may send.
    pub fn requires_creator(self) -> bool {
        matches!(
            self,
            ActionType::StartGame
                | ActionType::StartVoting
                | ActionType::NewGame
                | ActionType::TestAdminAction
        )
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "TEST_ACTION" => ActionType::TestAction,
            "TEST_ADMIN_ACTION" => ActionType::TestAdminAction,
            "START_GAME" => ActionType::StartGame,
            "GIVE_HINT" => ActionType::GiveHint,
            "START_VOTING" => ActionType::StartVoting,
            "VOTE" => ActionType::Vote,
            "CHAMELEON_GUESS" => ActionType::ChameleonGuess,
            "NEW_GAME" => ActionType::NewGame,
            other => {
                return Err(DomainError::validation(
                    ValidationKind::UnknownAction,
                    format!("Unknown action type '{other}'"),
                ))
            }
        };
        Ok(parsed)
    }
}

/// Inbound action as sent by a client.
///
/// `action_type` stays a raw string so an unknown tag surfaces as a
/// validation error instead of a frame that fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionMessage {
    pub game_session_token: String,
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_content: Option<String>,
}

impl PlayerActionMessage {
    pub fn parse(self) -> Result<PlayerAction, DomainError> {
        Ok(PlayerAction {
            token: self.game_session_token,
            action_type: self.action_type.parse()?,
            content: self.action_content,
        })
    }
}

/// Parsed inbound action, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub token: String,
    pub action_type: ActionType,
    pub content: Option<String>,
}

impl PlayerAction {
    pub fn new(token: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            token: token.into(),
            action_type,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOutcome {
    /// Voting picked the chameleon; they get a guess.
    ChameleonFound,
    /// Voting missed the chameleon (or nobody voted).
    ChameleonWon,
    /// Chameleon guessed the word.
    ChameleonWin,
    /// Chameleon guessed wrong.
    PlayersWin,
}

/// Outbound result broadcast to every subscriber of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionResult {
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_result: Option<ActionOutcome>,
}

impl PlayerActionResult {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            action_content: None,
            action_result: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.action_content = Some(content.into());
        self
    }

    pub fn with_outcome(mut self, outcome: ActionOutcome) -> Self {
        self.action_result = Some(outcome);
        self
    }
}
