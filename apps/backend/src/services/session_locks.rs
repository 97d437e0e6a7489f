//! Per-session critical sections.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per session token. Every mutation of a session, including
/// the voting deadline, runs while holding its guard.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, token: &str) -> OwnedMutexGuard<()> {
        // Shard guard must be released before awaiting the session mutex.
        let lock = Arc::clone(self.locks.entry(token.to_string()).or_default().value());
        lock.lock_owned().await
    }

    /// Drop the mutex for a deleted session unless someone still holds or waits on it.
    pub fn forget(&self, token: &str) {
        self.locks
            .remove_if(token, |_, lock| Arc::strong_count(lock) == 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
