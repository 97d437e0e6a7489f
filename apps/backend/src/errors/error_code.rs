//! Error codes for the Chameleon backend.
//!
//! Every error that leaves the backend (HTTP problem details or a private
//! WebSocket error frame) carries one of these codes. Add new codes here;
//! never pass ad-hoc strings as error codes.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Unknown username or wrong password
    InvalidCredentials,

    // Authorization
    /// Access denied
    Forbidden,
    /// User is not a player of the session
    NotAMember,
    /// Only the session creator may perform this action
    NotCreator,
    /// Only the chameleon may guess the secret word
    NotChameleon,

    // Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Action not allowed in the current game state
    PhaseMismatch,
    /// Hint given by a player whose turn it is not
    OutOfTurn,
    /// Fewer players than the configured minimum
    NotEnoughPlayers,
    /// Session already holds the configured maximum of players
    SessionFull,
    /// Empty, multi-word or word-leaking hint
    InvalidHint,
    /// Empty or multi-word guess
    InvalidGuess,
    /// Accused username is not a player of the session
    UnknownAccused,
    /// Self-accusation while the self-vote policy forbids it
    SelfVote,
    /// Action type is not part of the protocol
    UnknownAction,
    /// Username does not satisfy the username rules
    InvalidUsername,
    /// Password does not satisfy the length rules
    InvalidPassword,

    // Resource Not Found
    /// Game session not found
    SessionNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
    /// Stored state violates an engine invariant
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::Forbidden => "FORBIDDEN",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotCreator => "NOT_CREATOR",
            Self::NotChameleon => "NOT_CHAMELEON",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::SessionFull => "SESSION_FULL",
            Self::InvalidHint => "INVALID_HINT",
            Self::InvalidGuess => "INVALID_GUESS",
            Self::UnknownAccused => "UNKNOWN_ACCUSED",
            Self::SelfVote => "SELF_VOTE",
            Self::UnknownAction => "UNKNOWN_ACTION",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidPassword => "INVALID_PASSWORD",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
