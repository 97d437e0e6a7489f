use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type UserId = i64;

/// Overall game progression states.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Lobby: players join, nothing has been dealt.
    WaitingForPlayers,
    /// Players give hints in turn order.
    Started,
    /// Every player has given a hint; the creator may open voting.
    ReadyForVoting,
    /// Voting round open until everyone voted or the deadline fired.
    Voting,
    /// Chameleon was caught and gets one guess at the secret word.
    ChameleonTurn,
    /// Terminal: the chameleon escaped or guessed the word.
    ChameleonWin,
    /// Terminal: the chameleon was caught and guessed wrong.
    PlayersWin,
}

impl GameState {
    /// `true` once roles have been assigned.
    pub fn has_started(self) -> bool {
        !matches!(self, GameState::WaitingForPlayers)
    }
}

/// A game session record.
///
/// The hint order is an explicit list of player user ids plus a cursor.
/// "No next player" is simply the cursor reaching the end of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub creator_id: UserId,
    pub state: GameState,
    /// Set once on start-game, immutable afterwards.
    pub secret_word: Option<String>,
    pub turn_order: Vec<UserId>,
    pub turn_cursor: usize,
    pub created_at: OffsetDateTime,
    /// Deadline of the open voting round, if any.
    pub voting_deadline: Option<OffsetDateTime>,
}

impl Session {
    pub fn new(token: impl Into<String>, creator_id: UserId, created_at: OffsetDateTime) -> Self {
        Self {
            token: token.into(),
            creator_id,
            state: GameState::WaitingForPlayers,
            secret_word: None,
            turn_order: Vec::new(),
            turn_cursor: 0,
            created_at,
            voting_deadline: None,
        }
    }

    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }

    /// The player whose turn it is to give a hint; only defined while `Started`.
    pub fn current_turn(&self) -> Option<UserId> {
        if self.state != GameState::Started {
            return None;
        }
        self.turn_order.get(self.turn_cursor).copied()
    }

    /// Moves the cursor past the current player.
    ///
    /// Returns `true` when the player that just finished was the last one.
    pub fn advance_turn(&mut self) -> bool {
        self.turn_cursor += 1;
        self.turn_cursor >= self.turn_order.len()
    }
}

/// A user's seat in one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub user_id: UserId,
    pub username: String,
    pub session_token: String,
    pub is_chameleon: bool,
    pub given_hint: Option<String>,
    /// User id of the player this player accuses in the open voting round.
    pub accused: Option<UserId>,
}

impl Player {
    pub fn new(user_id: UserId, username: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            session_token: session_token.into(),
            is_chameleon: false,
            given_hint: None,
            accused: None,
        }
    }

    /// Clears everything a previous round left behind.
    pub fn reset_round(&mut self) {
        self.is_chameleon = false;
        self.given_hint = None;
        self.accused = None;
    }

    pub fn has_voted(&self) -> bool {
        self.accused.is_some()
    }
}
