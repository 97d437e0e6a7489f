#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod protocol;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::{GameConfig, SelfVotePolicy};
pub use error::AppError;
pub use extractors::auth_token::AuthToken;
pub use extractors::current_user::CurrentUser;
pub use infra::state::build_state;
pub use services::game_flow::GameFlowService;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
