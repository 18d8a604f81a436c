//! Chat author entity - a participant inside one chat
//!
//! An author may be anonymous (created before the participant signed in) and
//! later claimed by an account. Authors are never deleted, only marked as
//! having left.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AuthorId, ChatId, ChatPrincipalId, UserId};

/// Chat-scoped participant record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAuthor {
    pub id: AuthorId,
    /// Linked account, `None` while the author is unclaimed
    pub user_id: Option<UserId>,
    pub name: String,
    pub picture: Option<String>,
    pub is_anonymous: bool,
    pub has_left: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl ChatAuthor {
    /// Create an author that is not linked to any account
    pub fn anonymous(id: AuthorId, name: impl Into<String>) -> Self {
        Self {
            id,
            user_id: None,
            name: name.into(),
            picture: None,
            is_anonymous: true,
            has_left: false,
            version: 1,
            created_at: Utc::now(),
        }
    }

    /// Create an author for a registered account
    pub fn for_user(id: AuthorId, user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            is_anonymous: false,
            ..Self::anonymous(id, name)
        }
    }

    /// Builder-style picture setter
    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }

    #[inline]
    pub fn chat_id(&self) -> &ChatId {
        self.id.chat_id()
    }

    /// Whether an account has claimed this author
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.user_id.is_some()
    }

    /// Principal that refers to this author
    pub fn principal_id(&self) -> ChatPrincipalId {
        ChatPrincipalId::Author(self.id.clone())
    }

    /// Link this author to an account
    pub fn claim(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
        self.is_anonymous = false;
        self.version += 1;
    }

    /// Mark the author as having left the chat
    pub fn leave(&mut self) {
        if !self.has_left {
            self.has_left = true;
            self.version += 1;
        }
    }
}
