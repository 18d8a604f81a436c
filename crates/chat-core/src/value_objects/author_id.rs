//! Author ID - chat-scoped identifier of a chat participant
//!
//! Wire form: `{chat_id}:{local_id}` where `local_id` is the per-chat
//! sequence number assigned when the author was created.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ChatId;
use crate::error::DomainError;

/// Composite author reference (chat + local sequence number)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorId {
    chat_id: ChatId,
    local_id: u64,
}

impl AuthorId {
    /// Separator between the chat id and the local id
    pub const SEPARATOR: char = ':';

    pub fn new(chat_id: ChatId, local_id: u64) -> Self {
        Self { chat_id, local_id }
    }

    /// Parse the `{chat_id}:{local_id}` form
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let (chat_part, local_part) = s
            .split_once(Self::SEPARATOR)
            .ok_or_else(|| DomainError::InvalidAuthorId(s.to_string()))?;

        let chat_id =
            ChatId::parse(chat_part).map_err(|_| DomainError::InvalidAuthorId(s.to_string()))?;
        // u64::from_str accepts a leading '+', which is not part of the wire form
        if local_part.is_empty() || !local_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidAuthorId(s.to_string()));
        }
        let local_id = local_part
            .parse::<u64>()
            .map_err(|_| DomainError::InvalidAuthorId(s.to_string()))?;

        Ok(Self { chat_id, local_id })
    }

    #[inline]
    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    #[inline]
    pub fn local_id(&self) -> u64 {
        self.local_id
    }

    /// Check whether this author belongs to the given chat
    #[inline]
    pub fn belongs_to(&self, chat_id: &ChatId) -> bool {
        &self.chat_id == chat_id
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.chat_id, Self::SEPARATOR, self.local_id)
    }
}

impl FromStr for AuthorId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthorId::parse(s)
    }
}

impl Serialize for AuthorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        AuthorId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
