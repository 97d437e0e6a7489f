use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Access token taken from `Authorization: Bearer <token>`, or from a
/// `?token=` query parameter since browsers cannot set headers on a
/// WebSocket handshake.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthToken {
    pub token: String,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl AuthToken {
    pub fn from_req(req: &HttpRequest) -> Result<Self, AppError> {
        if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
            let auth_value = auth_header
                .to_str()
                .map_err(|_| AppError::unauthorized_missing_bearer())?;

            let mut parts = auth_value.split_whitespace();
            return match (parts.next(), parts.next(), parts.next()) {
                (Some("Bearer"), Some(token), None) => Ok(Self {
                    token: token.to_string(),
                }),
                _ => Err(AppError::unauthorized_missing_bearer()),
            };
        }

        web::Query::<TokenQuery>::from_query(req.query_string())
            .ok()
            .and_then(|q| q.into_inner().token)
            .filter(|t| !t.is_empty())
            .map(|token| Self { token })
            .ok_or_else(AppError::unauthorized_missing_bearer)
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(Self::from_req(req))
    }
}
