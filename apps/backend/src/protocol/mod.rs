pub mod actions;
pub mod views;

pub use actions::{ActionOutcome, ActionType, PlayerAction, PlayerActionMessage, PlayerActionResult};
pub use views::SessionView;
