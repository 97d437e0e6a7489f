//! Adapters for external dependencies.

pub mod sessions_mem;
pub mod users_mem;
pub mod words_static;

pub use sessions_mem::InMemorySessionStore;
pub use users_mem::InMemoryUserStore;
pub use words_static::StaticWordProvider;
