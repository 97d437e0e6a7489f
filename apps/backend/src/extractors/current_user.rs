use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use super::auth_token::AuthToken;
use crate::auth::jwt::verify_access_token;
use crate::domain::state::UserId;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Authenticated caller, resolved from a verified access token and checked
/// against the user store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let token = AuthToken::from_req(&req)?;
            let claims = verify_access_token(&token.token, &app_state.security)?;
            let user_id = claims.user_id()?;

            let user = app_state
                .users
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized(ErrorCode::Unauthorized, "User no longer exists")
                })?;

            Ok(CurrentUser {
                id: user.id,
                username: user.username,
            })
        })
    }
}
