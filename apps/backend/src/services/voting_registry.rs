//! Registry of open voting rounds.
//!
//! At most one round per session. Removing a round from the map is the
//! claim: whoever removes it resolves the round, everyone else backs off.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;
use uuid::Uuid;

pub type RoundId = Uuid;

#[derive(Debug)]
struct OpenRound {
    id: RoundId,
    timer: Option<AbortHandle>,
}

#[derive(Debug, Default)]
pub struct VotingRegistry {
    rounds: DashMap<String, OpenRound>,
}

impl VotingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a round for `token`. Returns `None` if one is already open.
    pub fn open(&self, token: &str) -> Option<RoundId> {
        match self.rounds.entry(token.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                slot.insert(OpenRound { id, timer: None });
                Some(id)
            }
        }
    }

    /// Attach the deadline task to its round. If the round is already gone
    /// the task is aborted on the spot.
    pub fn attach_timer(&self, token: &str, round: RoundId, timer: AbortHandle) -> bool {
        match self.rounds.get_mut(token) {
            Some(mut open) if open.id == round => {
                open.timer = Some(timer);
                true
            }
            _ => {
                timer.abort();
                false
            }
        }
    }

    /// Claim whatever round is open for `token` and abort its deadline task.
    pub fn claim(&self, token: &str) -> bool {
        match self.rounds.remove(token) {
            Some((_, open)) => {
                if let Some(timer) = open.timer {
                    timer.abort();
                }
                true
            }
            None => false,
        }
    }

    /// Claim only if `round` is still the open one. Used by the deadline task,
    /// so a stale timer can never claim a later round.
    pub fn claim_round(&self, token: &str, round: RoundId) -> bool {
        self.rounds
            .remove_if(token, |_, open| open.id == round)
            .is_some()
    }

    /// Drop the open round, if any, without resolving it.
    pub fn cancel(&self, token: &str) -> bool {
        self.claim(token)
    }

    pub fn is_open(&self, token: &str) -> bool {
        self.rounds.contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn one_round_per_session() {
        let registry = VotingRegistry::new();
        assert!(registry.open("a").is_some());
        assert!(registry.open("a").is_none());
        assert!(registry.open("b").is_some());
    }

    #[test]
    fn claim_succeeds_once() {
        let registry = VotingRegistry::new();
        let round = registry.open("a").unwrap();
        assert!(registry.claim("a"));
        assert!(!registry.claim("a"));
        assert!(!registry.claim_round("a", round));
    }

    #[test]
    fn stale_round_id_cannot_claim() {
        let registry = VotingRegistry::new();
        let first = registry.open("a").unwrap();
        assert!(registry.claim("a"));

        let second = registry.open("a").unwrap();
        assert!(!registry.claim_round("a", first));
        assert!(registry.is_open("a"));
        assert!(registry.claim_round("a", second));
        assert!(!registry.is_open("a"));
    }

    #[tokio::test]
    async fn claim_aborts_the_attached_timer() {
        let registry = VotingRegistry::new();
        let round = registry.open("a").unwrap();
        let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(3600)));
        assert!(registry.attach_timer("a", round, task.abort_handle()));

        assert!(registry.claim("a"));
        let joined = task.await;
        assert!(joined.is_err_and(|e| e.is_cancelled()));
    }

    #[tokio::test]
    async fn attaching_to_a_closed_round_aborts_the_timer() {
        let registry = VotingRegistry::new();
        let round = registry.open("a").unwrap();
        registry.cancel("a");

        let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(3600)));
        assert!(!registry.attach_timer("a", round, task.abort_handle()));
        assert!(task.await.is_err_and(|e| e.is_cancelled()));
    }
}
