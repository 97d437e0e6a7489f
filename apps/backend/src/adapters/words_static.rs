//! Fixed-vocabulary word provider.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::words::WordProvider;

const VOCABULARY: &[&str] = &[
    "apple", "banana", "orange", "grape", "strawberry", "computer", "keyboard", "mouse",
    "monitor", "laptop", "book", "pencil", "paper", "desk", "chair", "dog", "cat", "bird",
    "fish", "rabbit", "car", "bike", "bus", "train", "plane", "house", "apartment",
    "building", "room", "garden", "pizza", "burger", "sandwich", "salad", "soup", "movie",
    "music", "game", "sport", "art", "sun", "moon", "star", "cloud", "rain", "beach",
    "mountain", "forest", "river", "lake",
];

pub struct StaticWordProvider {
    words: Vec<String>,
    rng: Mutex<StdRng>,
}

impl StaticWordProvider {
    pub fn new() -> Self {
        Self::from_parts(
            VOCABULARY.iter().map(|w| w.to_string()).collect(),
            StdRng::from_os_rng(),
        )
    }

    /// Deterministic draws, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::from_parts(
            VOCABULARY.iter().map(|w| w.to_string()).collect(),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Custom vocabulary.
    pub fn with_words<I, S>(words: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_parts(
            words.into_iter().map(Into::into).collect(),
            StdRng::seed_from_u64(seed),
        )
    }

    fn from_parts(words: Vec<String>, rng: StdRng) -> Self {
        Self {
            words,
            rng: Mutex::new(rng),
        }
    }
}

impl Default for StaticWordProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl WordProvider for StaticWordProvider {
    fn next_word(&self) -> Result<String, DomainError> {
        let mut rng = self.rng.lock();
        self.words.choose(&mut *rng).cloned().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("Vocabulary".to_string()),
                "Word vocabulary is empty",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_come_from_the_vocabulary() {
        let provider = StaticWordProvider::seeded(5);
        for _ in 0..20 {
            let word = provider.next_word().unwrap();
            assert!(VOCABULARY.contains(&word.as_str()));
        }
    }

    #[test]
    fn single_word_vocabulary_is_deterministic() {
        let provider = StaticWordProvider::with_words(["apple"], 1);
        assert_eq!(provider.next_word().unwrap(), "apple");
    }

    #[test]
    fn empty_vocabulary_is_an_infra_error() {
        let provider = StaticWordProvider::with_words(Vec::<String>::new(), 1);
        assert!(matches!(
            provider.next_word(),
            Err(DomainError::Infra(..))
        ));
    }
}
