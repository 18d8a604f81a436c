//! Domain events - events emitted when chat state changes
//!
//! These events are fanned out through per-chat event streams to:
//! - Notify connected clients of real-time updates
//! - Trigger side effects (e.g., mention notifications)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AuthorId, ChatId, UserId};

/// Minimal capability of anything carried by an event stream
///
/// The stream is agnostic to the payload; it only needs to know which chat an
/// event belongs to and a stable name for logging and routing.
pub trait ChatEvent: Send + 'static {
    /// Chat the event belongs to
    fn chat_id(&self) -> &ChatId;

    /// Stable event type name
    fn event_type(&self) -> &'static str;
}

/// All chat domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatDomainEvent {
    MessagePosted(MessagePostedEvent),
    AuthorJoined(AuthorJoinedEvent),
    AuthorClaimed(AuthorClaimedEvent),
    AuthorLeft(AuthorLeftEvent),
}

impl ChatDomainEvent {
    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MessagePosted(e) => e.timestamp,
            Self::AuthorJoined(e) => e.timestamp,
            Self::AuthorClaimed(e) => e.timestamp,
            Self::AuthorLeft(e) => e.timestamp,
        }
    }

    /// Author that caused the event
    pub fn author_id(&self) -> &AuthorId {
        match self {
            Self::MessagePosted(e) => &e.author_id,
            Self::AuthorJoined(e) => &e.author_id,
            Self::AuthorClaimed(e) => &e.author_id,
            Self::AuthorLeft(e) => &e.author_id,
        }
    }
}

impl ChatEvent for ChatDomainEvent {
    fn chat_id(&self) -> &ChatId {
        match self {
            Self::MessagePosted(e) => &e.chat_id,
            Self::AuthorJoined(e) => &e.chat_id,
            Self::AuthorClaimed(e) => &e.chat_id,
            Self::AuthorLeft(e) => &e.chat_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            Self::MessagePosted(_) => "MESSAGE_POSTED",
            Self::AuthorJoined(_) => "AUTHOR_JOINED",
            Self::AuthorClaimed(_) => "AUTHOR_CLAIMED",
            Self::AuthorLeft(_) => "AUTHOR_LEFT",
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePostedEvent {
    pub chat_id: ChatId,
    pub entry_id: u64,
    pub author_id: AuthorId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorJoinedEvent {
    pub chat_id: ChatId,
    pub author_id: AuthorId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorClaimedEvent {
    pub chat_id: ChatId,
    pub author_id: AuthorId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLeftEvent {
    pub chat_id: ChatId,
    pub author_id: AuthorId,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Constructors
// ============================================================================

impl ChatDomainEvent {
    pub fn message_posted(author_id: AuthorId, entry_id: u64, text: impl Into<String>) -> Self {
        Self::MessagePosted(MessagePostedEvent {
            chat_id: author_id.chat_id().clone(),
            entry_id,
            author_id,
            text: text.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn author_joined(author_id: AuthorId) -> Self {
        Self::AuthorJoined(AuthorJoinedEvent {
            chat_id: author_id.chat_id().clone(),
            author_id,
            timestamp: Utc::now(),
        })
    }

    pub fn author_claimed(author_id: AuthorId, user_id: UserId) -> Self {
        Self::AuthorClaimed(AuthorClaimedEvent {
            chat_id: author_id.chat_id().clone(),
            author_id,
            user_id,
            timestamp: Utc::now(),
        })
    }

    pub fn author_left(author_id: AuthorId) -> Self {
        Self::AuthorLeft(AuthorLeftEvent {
            chat_id: author_id.chat_id().clone(),
            author_id,
            timestamp: Utc::now(),
        })
    }
}
