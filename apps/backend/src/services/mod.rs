pub mod broadcast;
pub mod game_flow;
pub mod session_locks;
pub mod voting_registry;

pub use broadcast::{ActionBroadcaster, NoopBroadcaster};
pub use game_flow::GameFlowService;
