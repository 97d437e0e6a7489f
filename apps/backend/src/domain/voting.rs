//! Vote tallying and tie-breaking.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::domain::state::UserId;

/// Count accusations per accused player, ignoring players who did not vote.
pub fn tally<I>(accusations: I) -> BTreeMap<UserId, usize>
where
    I: IntoIterator<Item = Option<UserId>>,
{
    let mut counts = BTreeMap::new();
    for accused in accusations.into_iter().flatten() {
        *counts.entry(accused).or_insert(0) += 1;
    }
    counts
}

/// All players sharing the highest count, in ascending id order.
pub fn leaders(counts: &BTreeMap<UserId, usize>) -> Vec<UserId> {
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    counts
        .iter()
        .filter(|(_, &count)| count == max)
        .map(|(&id, _)| id)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteVerdict {
    /// Nobody voted before the round closed.
    NoVotes,
    Accused(UserId),
}

/// Pick the accused player: highest count wins, ties broken uniformly at random.
pub fn pick_accused<I, R>(accusations: I, rng: &mut R) -> VoteVerdict
where
    I: IntoIterator<Item = Option<UserId>>,
    R: Rng + ?Sized,
{
    let counts = tally(accusations);
    match leaders(&counts).choose(rng) {
        Some(&id) => VoteVerdict::Accused(id),
        None => VoteVerdict::NoVotes,
    }
}
