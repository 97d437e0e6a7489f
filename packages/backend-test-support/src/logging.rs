//! Unified test logging initialization
//!
//! Integration test binaries call [`init`] from a `ctor` hook so every test
//! gets a subscriber wired to the test writer. Engine logs (turn changes,
//! voting deadlines, score recording) are quiet unless asked for.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The filter is read from `TEST_LOG`, then
/// `RUST_LOG`, then falls back to `warn`.
///
/// ```bash
/// TEST_LOG=chameleon_backend=debug cargo test --test voting_resolution_test
/// ```
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

/// Same as [`init`] but with a caller-chosen fallback filter.
pub fn init_with_default(default_filter: &str) {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
