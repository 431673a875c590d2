//! Error types for the ordered containers

use thiserror::Error;

/// Failures of container operations.
///
/// Both are recoverable by the caller checking `is_empty()` / `size()` first;
/// the operation itself never returns a sentinel instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Removal or peek on a container with no elements
    #[error("Container is empty")]
    EmptyContainer,

    /// Positional access outside `[0, size)`
    #[error("Index out of range: {index} >= {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

/// Result alias for container operations.
pub type CollectionResult<T> = Result<T, CollectionError>;
