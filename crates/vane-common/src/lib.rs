//! Vane Common - Shared types, errors, and utilities
//!
//! This crate provides the foundational pieces used across all Vane components:
//! - The storage error taxonomy
//! - Reserved namespace constants
//! - Key validation helpers

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::{ErrorKind, Result, StorageError};
pub use utils::is_valid_key;

/// Key of the namespace that must exist at all times
pub const DEFAULT_NAMESPACE: &str = "default";

/// Display name given to the default namespace when it is (re)created
pub const DEFAULT_NAMESPACE_NAME: &str = "Default";

/// Description given to the default namespace when it is (re)created
pub const DEFAULT_NAMESPACE_DESCRIPTION: &str = "Default namespace";

/// Namespace filter value that selects every namespace
pub const ALL_NAMESPACES: &str = "*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_namespace_constants() {
        assert_eq!(DEFAULT_NAMESPACE, "default");
        assert_eq!(DEFAULT_NAMESPACE_NAME, "Default");
        assert_eq!(DEFAULT_NAMESPACE_DESCRIPTION, "Default namespace");
        assert!(!is_valid_key(ALL_NAMESPACES));
    }
}
