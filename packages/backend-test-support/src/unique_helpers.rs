//! Test helpers for generating unique test data
//!
//! Usernames are unique across the whole user store, so tests that share a
//! store (or run in parallel against one) derive names from ULIDs.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique username that satisfies the backend's username rules
/// (ASCII alphanumerics and underscores, at most 32 characters).
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("p1");
/// assert!(name.starts_with("p1_"));
/// assert!(name.len() <= 32);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let ulid = Ulid::new().to_string().to_lowercase();
    let mut name = format!("{prefix}_{ulid}");
    name.truncate(32);
    name
}
