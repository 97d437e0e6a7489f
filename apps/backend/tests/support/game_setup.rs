use std::sync::Arc;

use backend_test_support::unique_helpers::unique_username;
use chameleon_backend::adapters::{InMemorySessionStore, InMemoryUserStore, StaticWordProvider};
use chameleon_backend::auth::password::PasswordHashing;
use chameleon_backend::config::GameConfig;
use chameleon_backend::domain::state::{GameState, Player, Session, UserId};
use chameleon_backend::errors::DomainError;
use chameleon_backend::protocol::actions::{ActionType, PlayerAction, PlayerActionResult};
use chameleon_backend::repos::{SessionStore, User, UserStore};
use chameleon_backend::services::GameFlowService;

use super::recording::RecordingBroadcaster;

pub const SECRET_WORD: &str = "apple";
pub const PASSWORD: &str = "pass1234";

/// Hints that never collide with `SECRET_WORD`.
pub const HINTS: &[&str] = &[
    "red", "fruit", "orchard", "crunchy", "cider", "pie", "tart", "juice",
];

/// Game flow service over in-memory stores with a fixed secret word and a
/// seeded rng.
pub struct Harness {
    pub service: Arc<GameFlowService>,
    pub sessions: Arc<InMemorySessionStore>,
    pub users: Arc<InMemoryUserStore>,
    pub broadcasts: Arc<RecordingBroadcaster>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self::with_config_and_seed(config, 7)
    }

    pub fn with_config_and_seed(config: GameConfig, seed: u64) -> Self {
        let sessions = Arc::new(InMemorySessionStore::new());
        let users = Arc::new(InMemoryUserStore::with_hashing(PasswordHashing::low_cost()));
        let broadcasts = Arc::new(RecordingBroadcaster::default());
        let words = Arc::new(StaticWordProvider::with_words([SECRET_WORD], seed));

        let service = GameFlowService::new(
            config,
            sessions.clone(),
            words,
            users.clone(),
            broadcasts.clone(),
        )
        .with_seed(seed);

        Self {
            service: Arc::new(service),
            sessions,
            users,
            broadcasts,
        }
    }

    pub async fn user(&self, prefix: &str) -> User {
        self.users
            .create_user(&unique_username(prefix), PASSWORD)
            .await
            .expect("create user")
    }

    /// A session created by the first of `n` fresh users, all of them seated.
    pub async fn session_with(&self, n: usize) -> (String, Vec<User>) {
        let mut users = Vec::with_capacity(n);
        for i in 0..n {
            users.push(self.user(&format!("p{}", i + 1)).await);
        }
        let creator = &users[0];
        let session = self
            .service
            .create_session(creator.id, &creator.username)
            .await
            .expect("create session");
        for user in &users[1..] {
            self.service
                .join_session(&session.token, user.id, &user.username)
                .await
                .expect("join session");
        }
        (session.token, users)
    }

    pub async fn act(
        &self,
        user_id: UserId,
        token: &str,
        action_type: ActionType,
        content: Option<&str>,
    ) -> Result<PlayerActionResult, DomainError> {
        let mut action = PlayerAction::new(token, action_type);
        if let Some(content) = content {
            action = action.with_content(content);
        }
        self.service.handle_action(user_id, action).await
    }

    pub async fn session(&self, token: &str) -> Option<Session> {
        self.sessions.load_by_token(token).await.expect("load session")
    }

    pub async fn state(&self, token: &str) -> GameState {
        self.session(token).await.expect("session exists").state
    }

    pub async fn players(&self, token: &str) -> Vec<Player> {
        self.sessions.load_players(token).await.expect("load players")
    }

    pub async fn chameleon(&self, token: &str) -> Player {
        self.players(token)
            .await
            .into_iter()
            .find(|p| p.is_chameleon)
            .expect("a chameleon is seated")
    }

    /// Start the game and have every player hint in turn order.
    pub async fn play_to_ready_for_voting(&self, token: &str, creator: UserId) {
        self.act(creator, token, ActionType::StartGame, None)
            .await
            .expect("start game");
        let order = self.session(token).await.expect("session").turn_order;
        for (user_id, hint) in order.iter().zip(HINTS) {
            self.act(*user_id, token, ActionType::GiveHint, Some(*hint))
                .await
                .expect("give hint");
        }
        assert_eq!(self.state(token).await, GameState::ReadyForVoting);
    }

    /// Same as above, then open voting.
    pub async fn play_to_voting(&self, token: &str, creator: UserId) {
        self.play_to_ready_for_voting(token, creator).await;
        self.act(creator, token, ActionType::StartVoting, None)
            .await
            .expect("start voting");
        assert_eq!(self.state(token).await, GameState::Voting);
    }

    pub async fn user_record(&self, id: UserId) -> User {
        self.users
            .find_by_id(id)
            .await
            .expect("find user")
            .expect("user exists")
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
