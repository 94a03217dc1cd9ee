//! Utility functions for Vane

use std::sync::LazyLock;

/// Regex pattern for namespace, flag, and segment keys
static KEY_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[-_,A-Za-z0-9]+$").expect("Invalid regex pattern"));

/// Validate an entity key
///
/// Allowed characters: alphanumeric, hyphen, underscore, comma. Empty keys are rejected.
///
/// # Examples
///
/// ```
/// use vane_common::is_valid_key;
///
/// assert!(is_valid_key("checkout-v2"));
/// assert!(is_valid_key("team_a,beta"));
/// assert!(!is_valid_key(""));
/// assert!(!is_valid_key("with spaces"));
/// ```
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}
