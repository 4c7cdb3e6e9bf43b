//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No user has the given identifier.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// No user has the given name.
    #[error("user not found: {0}")]
    UserNameNotFound(String),

    /// No post has the given identifier.
    #[error("post not found: {0}")]
    PostNotFound(Uuid),

    /// A user with this name is already registered.
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (worker pool, runtime, ...).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for the "entity absent" family of errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::UserNameNotFound(_) | Self::PostNotFound(_)
        )
    }
}
