//! Mention resolution
//!
//! Message text refers to participants with `@[<principal>]` markup, e.g.
//! `@[c1:5]` for a chat author or `@[alice]` for an account. A
//! `MentionResolver` is bound to one chat and never resolves authors of
//! another chat.

use std::sync::Arc;

use chat_common::Cancellation;
use chat_core::traits::AuthorDirectory;
use chat_core::{ChatAuthor, ChatId, ChatPrincipalId, UserId};
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::ServiceResult;
use super::principal::PrincipalResolver;

const MENTION_PREFIX: &str = "@[";
const MENTION_SUFFIX: char = ']';

/// A resolved mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub principal: ChatPrincipalId,
    /// Author record inside the resolver's chat, if there is one
    pub author: Option<ChatAuthor>,
    /// Account behind the principal, if linked
    pub account_id: Option<UserId>,
}

impl Mention {
    /// Markup that produces this mention
    pub fn markup(&self) -> String {
        format!("{MENTION_PREFIX}{}{MENTION_SUFFIX}", self.principal)
    }
}

/// Extract mentioned principals from message text
///
/// Returns valid principals in order of first appearance, without duplicates.
pub fn extract_mentions(text: &str) -> Vec<ChatPrincipalId> {
    let mut mentions: Vec<ChatPrincipalId> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(MENTION_PREFIX) {
        let after = &rest[start + MENTION_PREFIX.len()..];
        let Some(end) = after.find(MENTION_SUFFIX) else {
            break;
        };

        let candidate = &after[..end];
        if candidate.contains(|c: char| c == '[' || c.is_whitespace()) {
            // Unterminated markup; rescan from inside it
            rest = after;
            continue;
        }

        let principal = ChatPrincipalId::parse(candidate);
        if principal.is_valid() && !mentions.contains(&principal) {
            mentions.push(principal);
        }
        rest = &after[end + MENTION_SUFFIX.len_utf8()..];
    }

    mentions
}

/// Creates per-chat mention resolvers
#[derive(Clone)]
pub struct MentionResolverFactory {
    directory: Arc<dyn AuthorDirectory>,
}

impl MentionResolverFactory {
    pub fn new(directory: Arc<dyn AuthorDirectory>) -> Self {
        Self { directory }
    }

    /// Bind a resolver to `chat_id`. Performs no I/O.
    pub fn create(&self, chat_id: ChatId) -> MentionResolver {
        MentionResolver {
            chat_id,
            principals: PrincipalResolver::new(Arc::clone(&self.directory)),
        }
    }
}

impl std::fmt::Debug for MentionResolverFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionResolverFactory").finish_non_exhaustive()
    }
}

/// Resolves mentions inside a single chat
#[derive(Debug, Clone)]
pub struct MentionResolver {
    chat_id: ChatId,
    principals: PrincipalResolver,
}

impl MentionResolver {
    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// Resolve one mentioned principal
    ///
    /// Authors of other chats and unknown authors resolve to `None`. A user
    /// mention always resolves; its author is filled in when the account
    /// participates in this chat.
    #[instrument(skip(self, cancel), fields(chat_id = %self.chat_id, principal = %principal))]
    pub async fn resolve(
        &self,
        principal: &ChatPrincipalId,
        cancel: &Cancellation,
    ) -> ServiceResult<Option<Mention>> {
        match principal {
            ChatPrincipalId::Invalid => Ok(None),
            ChatPrincipalId::Author(author_id) if !author_id.belongs_to(&self.chat_id) => {
                debug!("Ignoring mention of an author from another chat");
                Ok(None)
            }
            ChatPrincipalId::Author(_) => {
                let author = self
                    .principals
                    .resolve_author(principal, &self.chat_id, cancel)
                    .await?;

                Ok(author.map(|author| Mention {
                    principal: principal.clone(),
                    account_id: author.user_id.clone(),
                    author: Some(author),
                }))
            }
            ChatPrincipalId::User(user_id) => {
                let author = self
                    .principals
                    .resolve_author(principal, &self.chat_id, cancel)
                    .await?;

                Ok(Some(Mention {
                    principal: principal.clone(),
                    author,
                    account_id: Some(user_id.clone()),
                }))
            }
        }
    }

    /// Resolve every mention found in `text`, in order of appearance
    #[instrument(skip(self, text, cancel), fields(chat_id = %self.chat_id))]
    pub async fn resolve_text(
        &self,
        text: &str,
        cancel: &Cancellation,
    ) -> ServiceResult<Vec<Mention>> {
        let mut mentions = Vec::new();
        for principal in extract_mentions(text) {
            if let Some(mention) = self.resolve(&principal, cancel).await? {
                mentions.push(mention);
            }
        }
        Ok(mentions)
    }
}
