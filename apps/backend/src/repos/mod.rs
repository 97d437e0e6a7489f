//! Repository traits for domain layer.

pub mod scores;
pub mod sessions;
pub mod users;
pub mod words;

pub use scores::ScoreRecorder;
pub use sessions::{require_session, SessionStore};
pub use users::{LeaderboardEntry, User, UserStore};
pub use words::WordProvider;
