use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;
use crate::protocol::actions::{PlayerActionMessage, PlayerActionResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// Start receiving results broadcast to a session.
    Subscribe {
        #[serde(rename = "gameSessionToken")]
        game_session_token: String,
    },
    Unsubscribe {
        #[serde(rename = "gameSessionToken")]
        game_session_token: String,
    },
    /// A player action; the sender is the authenticated connection owner.
    Action(PlayerActionMessage),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Ack {
        message: String,
    },

    /// Broadcast to every subscriber of the session.
    ActionResult(PlayerActionResult),

    /// Sent privately to the connection that caused it.
    Error {
        code: ErrorCode,
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}
