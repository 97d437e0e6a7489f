use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::state::UserId;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access tokens are valid for one evening of play.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id, as a string
    pub sub: String,
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt, "Malformed subject"))
    }
}

pub fn mint_access_token(
    user_id: UserId,
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`, everything else to
/// `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify() {
        let now = SystemTime::now();
        let token = mint_access_token(42, "alice", now, &security()).unwrap();
        let claims = verify_access_token(&token, &security()).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token() {
        let issued = SystemTime::now() - Duration::from_secs(13 * 60 * 60);
        let token = mint_access_token(1, "bob", issued, &security()).unwrap();

        let err = verify_access_token(&token, &security()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedExpiredJwt);
    }

    #[test]
    fn bad_signature() {
        let token =
            mint_access_token(1, "bob", SystemTime::now(), &SecurityConfig::new("secret-A".as_bytes()))
                .unwrap();
        let err = verify_access_token(&token, &SecurityConfig::new("secret-B".as_bytes())).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedInvalidJwt);
    }

    #[test]
    fn garbage_token() {
        let err = verify_access_token("not.a.jwt", &security()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedInvalidJwt);
    }
}
