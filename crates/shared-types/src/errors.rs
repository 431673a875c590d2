//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised by the persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No entity exists under the given key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Uniqueness constraint violated (duplicate username, email, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl RepositoryError {
    /// Builds a `NotFound` for `entity` keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether this is a `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for repository calls.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::not_found("User", "alice");
        assert_eq!(err.to_string(), "User not found: alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_is_not_not_found() {
        let err = RepositoryError::Conflict("username taken".into());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Conflict: username taken");
    }
}
