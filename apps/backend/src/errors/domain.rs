//! Domain-level error type used across the engine, services and adapters.
//!
//! This error type is HTTP- and transport-agnostic. The edges (HTTP handlers
//! and the WebSocket session) convert it into `crate::error::AppError` using
//! the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::ErrorCode;

/// Validation failures: the action is rejected and nothing is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PhaseMismatch,
    OutOfTurn,
    NotEnoughPlayers,
    SessionFull,
    InvalidHint,
    InvalidGuess,
    UnknownAccused,
    SelfVote,
    UnknownAction,
    InvalidUsername,
    InvalidPassword,
    Other(String),
}

/// Authorization failures (caller is known but may not do this).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    NotAMember,
    NotCreator,
    NotChameleon,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    User,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UsernameTaken,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Caller could not be resolved
    Unauthenticated(String),
    /// Caller is known but not allowed to perform the action
    Forbidden(ForbiddenKind, String),
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Unauthenticated(d) => write!(f, "unauthenticated: {d}"),
            DomainError::Forbidden(kind, d) => write!(f, "forbidden {kind:?}: {d}"),
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn unauthenticated(detail: impl Into<String>) -> Self {
        Self::Unauthenticated(detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Unauthenticated(_) => ErrorCode::Unauthorized,
            DomainError::Forbidden(kind, _) => match kind {
                ForbiddenKind::NotAMember => ErrorCode::NotAMember,
                ForbiddenKind::NotCreator => ErrorCode::NotCreator,
                ForbiddenKind::NotChameleon => ErrorCode::NotChameleon,
            },
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                ValidationKind::NotEnoughPlayers => ErrorCode::NotEnoughPlayers,
                ValidationKind::SessionFull => ErrorCode::SessionFull,
                ValidationKind::InvalidHint => ErrorCode::InvalidHint,
                ValidationKind::InvalidGuess => ErrorCode::InvalidGuess,
                ValidationKind::UnknownAccused => ErrorCode::UnknownAccused,
                ValidationKind::SelfVote => ErrorCode::SelfVote,
                ValidationKind::UnknownAction => ErrorCode::UnknownAction,
                ValidationKind::InvalidUsername => ErrorCode::InvalidUsername,
                ValidationKind::InvalidPassword => ErrorCode::InvalidPassword,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
                NotFoundKind::User => ErrorCode::UserNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::UsernameTaken => ErrorCode::UsernameTaken,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                InfraErrorKind::Other(_) => ErrorCode::InternalError,
            },
        }
    }

    /// Human readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Unauthenticated(d)
            | DomainError::Forbidden(_, d)
            | DomainError::Validation(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::Infra(_, d) => d,
        }
    }
}
