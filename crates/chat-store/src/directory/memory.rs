//! In-memory implementation of AuthorDirectory

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use chat_core::entities::ChatAuthor;
use chat_core::error::DomainError;
use chat_core::traits::{AuthorDirectory, RepoResult};
use chat_core::value_objects::{AuthorId, ChatId, UserId};

use super::names::random_author_name;

/// Authors of one chat, in creation order
///
/// The author with local id `n` is stored at index `n - 1`.
#[derive(Debug, Default)]
struct ChatRoster {
    authors: Vec<ChatAuthor>,
}

impl ChatRoster {
    fn next_local_id(&self) -> u64 {
        self.authors.len() as u64 + 1
    }

    fn get(&self, local_id: u64) -> Option<&ChatAuthor> {
        let index = usize::try_from(local_id.checked_sub(1)?).ok()?;
        self.authors.get(index)
    }

    fn get_mut(&mut self, local_id: u64) -> Option<&mut ChatAuthor> {
        let index = usize::try_from(local_id.checked_sub(1)?).ok()?;
        self.authors.get_mut(index)
    }

    fn find_by_user(&self, user_id: &UserId) -> Option<&ChatAuthor> {
        self.authors
            .iter()
            .find(|author| author.user_id.as_ref() == Some(user_id))
    }
}

/// `DashMap`-backed author directory
///
/// Each chat's roster is locked independently, so chats never contend with
/// each other.
#[derive(Debug, Default)]
pub struct MemoryAuthorDirectory {
    chats: DashMap<ChatId, ChatRoster>,
    /// Number of author lookups served
    lookups: AtomicU64,
}

impl MemoryAuthorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Create an author in `chat_id`
    ///
    /// Authors created without an account get a random display name. When the
    /// account already has an author in this chat, that author is returned.
    pub fn create(&self, chat_id: &ChatId, user_id: Option<UserId>) -> ChatAuthor {
        let mut roster = self.chats.entry(chat_id.clone()).or_default();

        if let Some(existing) = user_id
            .as_ref()
            .and_then(|user_id| roster.find_by_user(user_id))
        {
            return existing.clone();
        }

        let id = AuthorId::new(chat_id.clone(), roster.next_local_id());
        let author = match user_id {
            Some(user_id) => {
                let name = user_id.to_string();
                ChatAuthor::for_user(id, user_id, name)
            }
            None => ChatAuthor::anonymous(id, random_author_name()),
        };
        roster.authors.push(author.clone());

        tracing::debug!(
            author_id = %author.id,
            anonymous = author.is_anonymous,
            "Author created"
        );

        author
    }

    /// Link an author to an account
    pub fn claim(&self, author_id: &AuthorId, user_id: UserId) -> RepoResult<ChatAuthor> {
        let mut roster = self
            .chats
            .get_mut(author_id.chat_id())
            .ok_or_else(|| DomainError::AuthorNotFound(author_id.clone()))?;

        if let Some(owner) = roster.find_by_user(&user_id) {
            if owner.id != *author_id {
                return Err(DomainError::AuthorAlreadyClaimed {
                    author_id: owner.id.clone(),
                    user_id,
                });
            }
        }

        let author = roster
            .get_mut(author_id.local_id())
            .ok_or_else(|| DomainError::AuthorNotFound(author_id.clone()))?;

        if let Some(current) = &author.user_id {
            if *current == user_id {
                return Ok(author.clone());
            }
            return Err(DomainError::AuthorAlreadyClaimed {
                author_id: author_id.clone(),
                user_id: current.clone(),
            });
        }

        author.claim(user_id);
        tracing::debug!(author_id = %author.id, "Author claimed");
        Ok(author.clone())
    }

    /// Mark an author as having left its chat
    pub fn leave(&self, author_id: &AuthorId) -> RepoResult<ChatAuthor> {
        let mut roster = self
            .chats
            .get_mut(author_id.chat_id())
            .ok_or_else(|| DomainError::AuthorNotFound(author_id.clone()))?;

        let author = roster
            .get_mut(author_id.local_id())
            .ok_or_else(|| DomainError::AuthorNotFound(author_id.clone()))?;
        author.leave();

        Ok(author.clone())
    }

    /// Number of `get` / `get_by_user_id` calls served so far
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of authors across all chats
    pub fn author_count(&self) -> usize {
        self.chats.iter().map(|roster| roster.authors.len()).sum()
    }

    fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl AuthorDirectory for MemoryAuthorDirectory {
    #[instrument(skip(self))]
    async fn get(
        &self,
        chat_id: &ChatId,
        author_id: &AuthorId,
        include_unlinked: bool,
    ) -> RepoResult<Option<ChatAuthor>> {
        self.record_lookup();

        if !author_id.belongs_to(chat_id) {
            return Ok(None);
        }

        let author = self.chats.get(chat_id).and_then(|roster| {
            roster
                .get(author_id.local_id())
                .filter(|author| include_unlinked || author.is_linked())
                .cloned()
        });

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn get_by_user_id(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> RepoResult<Option<ChatAuthor>> {
        self.record_lookup();

        Ok(self
            .chats
            .get(chat_id)
            .and_then(|roster| roster.find_by_user(user_id).cloned()))
    }

    #[instrument(skip(self))]
    async fn list_author_ids(&self, chat_id: &ChatId) -> RepoResult<Vec<AuthorId>> {
        Ok(self
            .chats
            .get(chat_id)
            .map(|roster| roster.authors.iter().map(|a| a.id.clone()).collect())
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn list_user_ids(&self, chat_id: &ChatId) -> RepoResult<Vec<UserId>> {
        Ok(self
            .chats
            .get(chat_id)
            .map(|roster| {
                roster
                    .authors
                    .iter()
                    .filter_map(|a| a.user_id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}
