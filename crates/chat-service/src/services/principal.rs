//! Principal resolution
//!
//! Maps a chat principal to the account behind it. Only author principals
//! need the directory; user principals already carry their account id.

use std::future::Future;
use std::sync::Arc;

use chat_common::Cancellation;
use chat_core::traits::{AuthorDirectory, RepoResult};
use chat_core::{ChatAuthor, ChatId, ChatPrincipalId, UserId};
use tracing::{debug, instrument, warn};

use super::error::{ServiceError, ServiceResult};

/// Resolves principals to account ids through an `AuthorDirectory`
#[derive(Clone)]
pub struct PrincipalResolver {
    directory: Arc<dyn AuthorDirectory>,
}

impl PrincipalResolver {
    pub fn new(directory: Arc<dyn AuthorDirectory>) -> Self {
        Self { directory }
    }

    /// Account id behind a parsed principal
    ///
    /// `Invalid` resolves to `None` without a lookup, and so does an author
    /// that is unknown or not linked to any account.
    #[instrument(skip(self, cancel), fields(principal = %principal))]
    pub async fn resolve_account_id(
        &self,
        principal: &ChatPrincipalId,
        cancel: &Cancellation,
    ) -> ServiceResult<Option<UserId>> {
        match principal {
            ChatPrincipalId::Invalid => Ok(None),
            ChatPrincipalId::User(user_id) => Ok(Some(user_id.clone())),
            ChatPrincipalId::Author(author_id) => {
                let author = with_cancellation(
                    cancel,
                    self.directory.get(author_id.chat_id(), author_id, false),
                )
                .await?;

                if author.is_none() {
                    debug!("Author is unknown or unlinked");
                }
                Ok(author.and_then(|author| author.user_id))
            }
        }
    }

    /// Account id behind a raw principal string
    ///
    /// Unlike `resolve_account_id`, a non-empty string that is neither a user
    /// nor an author reference is returned as-is. Older records store bare
    /// account ids in this form.
    #[instrument(skip(self, cancel))]
    pub async fn resolve_raw_account_id(
        &self,
        raw: &str,
        cancel: &Cancellation,
    ) -> ServiceResult<Option<UserId>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let principal = ChatPrincipalId::parse(raw);
        if principal.is_valid() {
            return self.resolve_account_id(&principal, cancel).await;
        }

        warn!("Unstructured principal id used as a legacy account id");
        Ok(Some(UserId::parse(raw)?))
    }

    /// Author record a principal denotes inside `chat_id`
    ///
    /// Unlinked authors are included. A user principal resolves to the author
    /// that account uses in the chat, if any.
    #[instrument(skip(self, cancel), fields(principal = %principal, chat_id = %chat_id))]
    pub async fn resolve_author(
        &self,
        principal: &ChatPrincipalId,
        chat_id: &ChatId,
        cancel: &Cancellation,
    ) -> ServiceResult<Option<ChatAuthor>> {
        match principal {
            ChatPrincipalId::Invalid => Ok(None),
            ChatPrincipalId::Author(author_id) if !author_id.belongs_to(chat_id) => Ok(None),
            ChatPrincipalId::Author(author_id) => {
                with_cancellation(cancel, self.directory.get(chat_id, author_id, true)).await
            }
            ChatPrincipalId::User(user_id) => {
                with_cancellation(cancel, self.directory.get_by_user_id(chat_id, user_id)).await
            }
        }
    }
}

impl std::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalResolver")
            .field("directory", &"AuthorDirectory")
            .finish()
    }
}

/// Race a directory lookup against `cancel`
pub(crate) async fn with_cancellation<T, F>(cancel: &Cancellation, lookup: F) -> ServiceResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(ServiceError::Cancelled);
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ServiceError::Cancelled),
        result = lookup => result.map_err(ServiceError::from),
    }
}
