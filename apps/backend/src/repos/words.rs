//! Secret word source.

use crate::errors::domain::DomainError;

pub trait WordProvider: Send + Sync {
    /// One word drawn at random from the vocabulary.
    fn next_word(&self) -> Result<String, DomainError>;
}
