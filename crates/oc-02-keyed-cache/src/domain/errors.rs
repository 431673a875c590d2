//! Error types for the Keyed Cache Layer

use shared_types::RepositoryError;
use thiserror::Error;

/// All errors surfaced by the cached services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Neither the cache nor the source has the entity
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Uniqueness rule violated (duplicate username, email, enrollment)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request rejected before reaching the source
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Source failure
    #[error("Repository error: {0}")]
    Backend(String),
}

impl CacheError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<RepositoryError> for CacheError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => Self::NotFound { entity, key },
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::Backend(msg) => Self::Backend(msg),
        }
    }
}

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
