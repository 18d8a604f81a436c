//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Everything here is read-only from the point
//! of view of identity resolution.

use async_trait::async_trait;

use crate::entities::ChatAuthor;
use crate::error::DomainError;
use crate::value_objects::{AuthorId, ChatId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Author Directory
// ============================================================================

#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Find an author of `chat_id`
    ///
    /// Authors of other chats never match. With `include_unlinked == false`,
    /// authors that no account has claimed are treated as absent.
    async fn get(
        &self,
        chat_id: &ChatId,
        author_id: &AuthorId,
        include_unlinked: bool,
    ) -> RepoResult<Option<ChatAuthor>>;

    /// Find the author an account uses inside a chat
    async fn get_by_user_id(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> RepoResult<Option<ChatAuthor>>;

    /// List all author ids of a chat, in creation order
    async fn list_author_ids(&self, chat_id: &ChatId) -> RepoResult<Vec<AuthorId>>;

    /// List accounts linked to authors of a chat
    async fn list_user_ids(&self, chat_id: &ChatId) -> RepoResult<Vec<UserId>>;
}
