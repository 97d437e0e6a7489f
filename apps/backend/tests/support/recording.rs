use chameleon_backend::protocol::actions::{ActionType, PlayerActionResult};
use chameleon_backend::services::broadcast::ActionBroadcaster;
use parking_lot::Mutex;

/// Keeps every published result so tests can inspect timer-driven broadcasts.
#[derive(Default)]
pub struct RecordingBroadcaster {
    published: Mutex<Vec<(String, PlayerActionResult)>>,
}

impl RecordingBroadcaster {
    pub fn published(&self) -> Vec<(String, PlayerActionResult)> {
        self.published.lock().clone()
    }

    pub fn for_token(&self, token: &str) -> Vec<PlayerActionResult> {
        self.published
            .lock()
            .iter()
            .filter(|(t, _)| t == token)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// END_VOTING results published for `token`, from the deadline or the
    /// last vote.
    pub fn resolutions(&self, token: &str) -> Vec<PlayerActionResult> {
        self.for_token(token)
            .into_iter()
            .filter(|r| r.action_type == ActionType::EndVoting)
            .collect()
    }
}

impl ActionBroadcaster for RecordingBroadcaster {
    fn publish(&self, token: &str, result: &PlayerActionResult) {
        self.published
            .lock()
            .push((token.to_string(), result.clone()));
    }
}
