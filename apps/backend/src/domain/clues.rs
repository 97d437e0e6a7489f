//! Hint and guess validation.

use crate::errors::domain::{DomainError, ValidationKind};

/// Trim and require exactly one whitespace-free token.
fn single_token(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed.split_whitespace().nth(1).is_some() {
        return None;
    }
    Some(trimmed)
}

/// Validate a hint against the round's secret word.
///
/// A hint must be a single non-empty token and must neither contain nor be
/// contained in the secret word (case-insensitive). Returns the lowercased
/// hint that gets stored.
pub fn validate_hint(raw: Option<&str>, secret_word: &str) -> Result<String, DomainError> {
    let token = single_token(raw).ok_or_else(|| {
        DomainError::validation(ValidationKind::InvalidHint, "Hint must be a single word")
    })?;

    let hint = token.to_lowercase();
    let secret = secret_word.to_lowercase();
    if hint.contains(&secret) || secret.contains(&hint) {
        return Err(DomainError::validation(
            ValidationKind::InvalidHint,
            "Hint is too close to the secret word",
        ));
    }
    Ok(hint)
}

/// Validate the shape of a chameleon guess.
pub fn validate_guess(raw: Option<&str>) -> Result<String, DomainError> {
    single_token(raw).map(str::to_string).ok_or_else(|| {
        DomainError::validation(ValidationKind::InvalidGuess, "Guess must be a single word")
    })
}

pub fn guess_matches(guess: &str, secret_word: &str) -> bool {
    guess.to_lowercase() == secret_word.to_lowercase()
}
