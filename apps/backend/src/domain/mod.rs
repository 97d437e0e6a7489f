//! Domain layer: pure game logic types and helpers.

pub mod clues;
pub mod outcome;
pub mod roles;
pub mod state;
pub mod voting;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_clues;
#[cfg(test)]
mod tests_outcome;
#[cfg(test)]
mod tests_roles;
#[cfg(test)]
mod tests_voting;

// Re-exports for ergonomics
pub use outcome::{ScoreDelta, Winner};
pub use roles::{assign_roles, RoundSetup};
pub use state::{GameState, Player, Session, UserId};
pub use voting::VoteVerdict;
