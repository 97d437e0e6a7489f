use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::state::GameState;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub game_session_token: String,
    pub state: GameState,
}

async fn create(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state
        .game_flow
        .create_session(user.id, &user.username)
        .await?;
    Ok(HttpResponse::Created().json(CreatedSession {
        game_session_token: session.token,
        state: session.state,
    }))
}

async fn join(
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();
    app_state
        .game_flow
        .join_session(&token, user.id, &user.username)
        .await?;
    let view = app_state.game_flow.session_view(&token, user.id).await?;
    Ok(HttpResponse::Ok().json(view))
}

async fn view(
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .game_flow
        .session_view(&path.into_inner(), user.id)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("/{token}", web::get().to(view))
        .route("/{token}/join", web::post().to(join));
}
