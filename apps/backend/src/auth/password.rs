//! Password hashing for registered accounts.
//!
//! Hashes are Argon2id PHC strings. Verification reads the cost parameters
//! from the stored hash, so accounts hashed under an older cost keep working.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_PASSWORD_LEN: usize = 128;

const SALT_LEN: usize = 16;

#[derive(Clone)]
pub struct PasswordHashing {
    argon2: Argon2<'static>,
}

impl PasswordHashing {
    /// Argon2id with the crate's recommended cost.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// The smallest cost Argon2 accepts. Only for tests, which register many
    /// accounts.
    pub fn low_cost() -> Self {
        Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )
        .map(Self::with_params)
        .unwrap_or_default()
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        let mut bytes = [0u8; SALT_LEN];
        rand::rng().fill(&mut bytes);

        let salt = SaltString::encode_b64(&bytes).map_err(hashing_failed)?;
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(hashing_failed)
    }

    /// `false` for a wrong password and for a stored value that is not a
    /// valid hash.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PasswordHashing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHashing").finish_non_exhaustive()
    }
}

fn hashing_failed(err: argon2::password_hash::Error) -> DomainError {
    DomainError::infra(
        InfraErrorKind::Other("password_hash".to_string()),
        format!("Failed to hash password: {err}"),
    )
}

pub fn validate_password(raw: &str) -> Result<(), DomainError> {
    let len = raw.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            format!("Password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_salts() {
        let hashing = PasswordHashing::low_cost();
        let first = hashing.hash("hunter22").unwrap();
        let second = hashing.hash("hunter22").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(hashing.verify("hunter22", &first));
        assert!(!hashing.verify("hunter23", &first));
    }

    #[test]
    fn verify_uses_the_cost_stored_in_the_hash() {
        let stored = PasswordHashing::low_cost().hash("pw1234").unwrap();
        assert!(PasswordHashing::new().verify("pw1234", &stored));
    }

    #[test]
    fn garbage_hashes_never_verify() {
        assert!(!PasswordHashing::low_cost().verify("pw1234", "not-a-hash"));
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("abcd").is_ok());
        assert!(matches!(
            validate_password("abc"),
            Err(DomainError::Validation(ValidationKind::InvalidPassword, _))
        ));
        assert!(validate_password(&"x".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }
}
