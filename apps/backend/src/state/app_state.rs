use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::UserStore;
use crate::services::GameFlowService;
use crate::ws::hub::SessionHub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub game_flow: Arc<GameFlowService>,
    pub users: Arc<dyn UserStore>,
    /// Realtime topics, one per session token
    pub hub: Arc<SessionHub>,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        game_flow: Arc<GameFlowService>,
        users: Arc<dyn UserStore>,
        hub: Arc<SessionHub>,
    ) -> Self {
        Self {
            security,
            game_flow,
            users,
            hub,
        }
    }
}
