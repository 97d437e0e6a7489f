use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Register a username and hand back an access token for it.
async fn register(
    req: web::Json<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state
        .users
        .create_user(&req.username, &req.password)
        .await?;
    let token = mint_access_token(user.id, &user.username, SystemTime::now(), &app_state.security)?;
    info!(user_id = user.id, "User registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        id: user.id,
        username: user.username,
        token,
    }))
}

/// Exchange username and password for a fresh access token.
async fn login(
    req: web::Json<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let Some(user) = app_state
        .users
        .verify_credentials(&req.username, &req.password)
        .await?
    else {
        warn!("Login rejected");
        return Err(AppError::invalid_credentials());
    };
    let token = mint_access_token(user.id, &user.username, SystemTime::now(), &app_state.security)?;
    info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        id: user.id,
        username: user.username,
        token,
    }))
}

async fn leaderboard(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = app_state.users.leaderboard().await?;
    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/leaderboard", web::get().to(leaderboard));
}
