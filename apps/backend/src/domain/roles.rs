//! Role assignment and hint order for a new round.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::domain::state::UserId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of dealing roles for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSetup {
    /// Hint order; a permutation of the seated players.
    pub turn_order: Vec<UserId>,
    pub chameleon: UserId,
}

/// Shuffle the hint order and pick exactly one chameleon, both uniformly.
pub fn assign_roles<R: Rng + ?Sized>(
    players: &[UserId],
    rng: &mut R,
) -> Result<RoundSetup, DomainError> {
    let chameleon = *players.choose(rng).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            "Cannot assign roles without players",
        )
    })?;

    let mut turn_order = players.to_vec();
    turn_order.shuffle(rng);

    Ok(RoundSetup {
        turn_order,
        chameleon,
    })
}
