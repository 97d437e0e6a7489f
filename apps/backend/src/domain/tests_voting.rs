//! Tally and tie-break tests (pure domain).

use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::test_prelude;
use crate::domain::voting::{leaders, pick_accused, tally, VoteVerdict};

#[test]
fn tally_skips_players_who_did_not_vote() {
    let counts = tally([Some(2), None, Some(2), Some(3)]);
    assert_eq!(counts, BTreeMap::from([(2, 2), (3, 1)]));
}

#[test]
fn no_votes_means_no_verdict() {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(pick_accused([None, None, None], &mut rng), VoteVerdict::NoVotes);
    assert_eq!(pick_accused(Vec::<Option<i64>>::new(), &mut rng), VoteVerdict::NoVotes);
}

#[test]
fn clear_majority_wins() {
    let mut rng = StdRng::seed_from_u64(3);
    let verdict = pick_accused([Some(4), Some(4), Some(1), Some(4)], &mut rng);
    assert_eq!(verdict, VoteVerdict::Accused(4));
}

#[test]
fn ties_are_all_leaders() {
    let counts = tally([Some(1), Some(2), Some(1), Some(2), Some(3)]);
    assert_eq!(leaders(&counts), vec![1, 2]);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the tie-break never picks outside the max-count set.
    #[test]
    fn prop_tie_break_stays_in_max_set(
        votes in prop::collection::vec(prop::option::of(1i64..6), 0..10),
        seed in any::<u64>(),
    ) {
        let counts = tally(votes.iter().copied());
        let max_set = leaders(&counts);
        let mut rng = StdRng::seed_from_u64(seed);

        match pick_accused(votes.iter().copied(), &mut rng) {
            VoteVerdict::NoVotes => prop_assert!(counts.is_empty()),
            VoteVerdict::Accused(id) => {
                prop_assert!(max_set.contains(&id));
                let max = counts.values().copied().max().unwrap_or(0);
                prop_assert_eq!(counts.get(&id).copied(), Some(max));
            }
        }
    }
}
