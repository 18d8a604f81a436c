//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AuthorId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Author not found: {0}")]
    AuthorNotFound(AuthorId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid chat id: {0:?}")]
    InvalidChatId(String),

    #[error("Invalid author id: {0:?}")]
    InvalidAuthorId(String),

    #[error("Invalid user id: must not be empty")]
    InvalidUserId,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Author {author_id} is already claimed by {user_id}")]
    AuthorAlreadyClaimed { author_id: AuthorId, user_id: UserId },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthorNotFound(_) => "UNKNOWN_AUTHOR",
            Self::InvalidChatId(_) => "INVALID_CHAT_ID",
            Self::InvalidAuthorId(_) => "INVALID_AUTHOR_ID",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::AuthorAlreadyClaimed { .. } => "AUTHOR_ALREADY_CLAIMED",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AuthorNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidChatId(_) | Self::InvalidAuthorId(_) | Self::InvalidUserId
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AuthorAlreadyClaimed { .. })
    }
}
