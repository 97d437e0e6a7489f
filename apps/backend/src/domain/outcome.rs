//! Round outcome and per-player score deltas.

use crate::domain::state::{GameState, Player, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Chameleon,
    Players,
}

impl Winner {
    pub fn terminal_state(self) -> GameState {
        match self {
            Winner::Chameleon => GameState::ChameleonWin,
            Winner::Players => GameState::PlayersWin,
        }
    }

    /// Whether a player on the given side won the round.
    pub fn player_won(self, is_chameleon: bool) -> bool {
        match self {
            Winner::Chameleon => is_chameleon,
            Winner::Players => !is_chameleon,
        }
    }
}

/// Score change for one player: every player played a round, some won it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDelta {
    pub user_id: UserId,
    pub won: bool,
}

pub fn score_deltas(winner: Winner, players: &[Player]) -> Vec<ScoreDelta> {
    players
        .iter()
        .map(|p| ScoreDelta {
            user_id: p.user_id,
            won: winner.player_won(p.is_chameleon),
        })
        .collect()
}
