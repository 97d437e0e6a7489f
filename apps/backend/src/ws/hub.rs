use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::protocol::actions::PlayerActionResult;
use crate::services::broadcast::ActionBroadcaster;

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct ActionBroadcast {
    pub token: String,
    pub result: PlayerActionResult,
}

/// Connections subscribed to each session token.
#[derive(Default)]
pub struct SessionHub {
    topics: DashMap<String, DashMap<Uuid, Recipient<ActionBroadcast>>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self {
            topics: DashMap::new(),
        }
    }

    pub fn register(&self, token: &str, conn_id: Uuid, recipient: Recipient<ActionBroadcast>) {
        self.topics
            .entry(token.to_string())
            .or_default()
            .insert(conn_id, recipient);
    }

    pub fn unregister(&self, token: &str, conn_id: Uuid) {
        if let Some(entry) = self.topics.get(token) {
            entry.remove(&conn_id);
        }
        self.topics.remove_if(token, |_, subs| subs.is_empty());
    }

    /// Remove a connection from every topic it joined.
    pub fn unregister_connection(&self, conn_id: Uuid) {
        for entry in self.topics.iter() {
            entry.value().remove(&conn_id);
        }
        self.topics.retain(|_, subs| !subs.is_empty());
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn subscriber_count(&self, token: &str) -> usize {
        self.topics.get(token).map(|subs| subs.len()).unwrap_or(0)
    }

    pub fn broadcast(&self, token: &str, result: &PlayerActionResult) {
        let Some(entry) = self.topics.get(token) else {
            debug!(token, "No subscribers for broadcast");
            return;
        };
        let message = ActionBroadcast {
            token: token.to_string(),
            result: result.clone(),
        };
        for recipient in entry.iter() {
            recipient.value().do_send(message.clone());
        }
    }
}

impl ActionBroadcaster for SessionHub {
    fn publish(&self, token: &str, result: &PlayerActionResult) {
        self.broadcast(token, result);
    }
}
