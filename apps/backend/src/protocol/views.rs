use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{GameState, Player, Session, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_hint: Option<String>,
    pub has_voted: bool,
}

/// Viewer-relative role information. The secret word is only present for
/// players who are not the chameleon, and only after the game started.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewerRole {
    pub is_chameleon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub game_session_token: String,
    pub creator: String,
    pub state: GameState,
    pub players: Vec<PlayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<String>,
    /// Unix milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<i64>,
    pub viewer: ViewerRole,
}

pub fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

impl SessionView {
    pub fn build(session: &Session, players: &[Player], viewer_id: UserId) -> Self {
        let username_of = |id: UserId| {
            players
                .iter()
                .find(|p| p.user_id == id)
                .map(|p| p.username.clone())
        };

        let me = players.iter().find(|p| p.user_id == viewer_id);
        let is_chameleon = me.is_some_and(|p| p.is_chameleon);
        let secret_word = if me.is_some() && !is_chameleon {
            session.secret_word.clone()
        } else {
            None
        };

        Self {
            game_session_token: session.token.clone(),
            creator: username_of(session.creator_id).unwrap_or_default(),
            state: session.state,
            players: players
                .iter()
                .map(|p| PlayerView {
                    username: p.username.clone(),
                    given_hint: p.given_hint.clone(),
                    has_voted: p.has_voted(),
                })
                .collect(),
            current_turn: session.current_turn().and_then(username_of),
            voting_deadline: session.voting_deadline.map(unix_millis),
            viewer: ViewerRole {
                is_chameleon,
                secret_word,
            },
        }
    }
}
