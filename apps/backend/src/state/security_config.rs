use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Configuration for JWT security settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Read `BACKEND_JWT_SECRET`; it is required and must not be empty.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("BACKEND_JWT_SECRET")?;
        if secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }
        Ok(Self::new(secret.into_bytes()))
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
