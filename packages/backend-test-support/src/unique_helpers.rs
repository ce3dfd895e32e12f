//! Unique fixture names.
//!
//! Lessons and users seeded by different tests share one database per test
//! binary, so their titles carry a ULID suffix.

use ulid::Ulid;

/// Generate a unique string with the given prefix, `{prefix}-{ulid}`.
///
/// ```
/// use lesson_games_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("lesson");
/// let b = unique_str("lesson");
/// assert_ne!(a, b);
/// assert!(a.starts_with("lesson-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Unique lesson title.
pub fn unique_lesson_title() -> String {
    unique_str("lesson")
}

/// Unique author username, lower-cased so it reads like a handle.
pub fn unique_username() -> String {
    unique_str("author").to_lowercase()
}
