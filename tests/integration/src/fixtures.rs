//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chat_core::{AuthorId, ChatAuthor, ChatDomainEvent, ChatId, UserId};
use chat_store::MemoryAuthorDirectory;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A chat id no other test uses
pub fn unique_chat_id() -> ChatId {
    chat_id(&format!("chat-{}", unique_suffix()))
}

pub fn chat_id(raw: &str) -> ChatId {
    ChatId::parse(raw).expect("valid chat id")
}

pub fn user_id(raw: &str) -> UserId {
    UserId::parse(raw).expect("valid user id")
}

/// A chat with one linked and one anonymous author
#[derive(Debug)]
pub struct ChatFixture {
    pub chat_id: ChatId,
    pub directory: Arc<MemoryAuthorDirectory>,
    pub member: ChatAuthor,
    pub anonymous: ChatAuthor,
}

impl ChatFixture {
    /// Populate `directory` with a fresh chat
    pub fn create(directory: &Arc<MemoryAuthorDirectory>) -> Self {
        let chat_id = unique_chat_id();
        let member = directory.create(
            &chat_id,
            Some(user_id(&format!("user-{}", unique_suffix()))),
        );
        let anonymous = directory.create(&chat_id, None);

        Self {
            chat_id,
            directory: Arc::clone(directory),
            member,
            anonymous,
        }
    }

    /// Account linked to `member`
    pub fn member_user_id(&self) -> &UserId {
        self.member.user_id.as_ref().expect("member is linked")
    }
}

/// Message event posted by `author`
pub fn message(author_id: &AuthorId, entry_id: u64) -> ChatDomainEvent {
    ChatDomainEvent::message_posted(author_id.clone(), entry_id, format!("message {entry_id}"))
}

/// Entry id of a message event
pub fn entry_id(event: &ChatDomainEvent) -> Option<u64> {
    match event {
        ChatDomainEvent::MessagePosted(e) => Some(e.entry_id),
        _ => None,
    }
}
