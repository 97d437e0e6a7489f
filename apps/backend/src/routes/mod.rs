use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod realtime;
pub mod sessions;
pub mod users;

/// Register every route. Shared by `main.rs` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Undecodable JSON bodies answer with problem details like every other error
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Sessions: /api/sessions/**
    cfg.service(web::scope("/api/sessions").configure(sessions::configure_routes));

    // Realtime: /api/ws
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));

    // Users, login and leaderboard: /api/users, /api/login, /api/leaderboard
    cfg.service(web::scope("/api").configure(users::configure_routes));
}
