//! Chat principal ID - "who acted" inside a chat
//!
//! A principal is either a registered account (`User`) or a chat-local
//! author that may not be linked to any account (`Author`). Parsing is total:
//! malformed input becomes `Invalid` instead of an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{AuthorId, ChatId, UserId};

/// Classification of a parsed principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    User,
    Author,
    Invalid,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Author => "author",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed chat principal reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChatPrincipalId {
    User(UserId),
    Author(AuthorId),
    #[default]
    Invalid,
}

impl ChatPrincipalId {
    /// Parse a raw principal string. Never fails.
    ///
    /// - empty → `Invalid`
    /// - contains `:` → `Author` when the composite id parses, `Invalid` otherwise
    /// - anything else → `User` carrying the raw string
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Self::Invalid;
        }
        if s.contains(AuthorId::SEPARATOR) {
            return AuthorId::parse(s).map_or(Self::Invalid, Self::Author);
        }
        UserId::parse(s).map_or(Self::Invalid, Self::User)
    }

    #[inline]
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::User(_) => PrincipalKind::User,
            Self::Author(_) => PrincipalKind::Author,
            Self::Invalid => PrincipalKind::Invalid,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            _ => None,
        }
    }

    pub fn author_id(&self) -> Option<&AuthorId> {
        match self {
            Self::Author(id) => Some(id),
            _ => None,
        }
    }

    /// Chat the principal is scoped to (authors only)
    pub fn chat_id(&self) -> Option<&ChatId> {
        self.author_id().map(AuthorId::chat_id)
    }
}

impl fmt::Display for ChatPrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{id}"),
            Self::Author(id) => write!(f, "{id}"),
            Self::Invalid => Ok(()),
        }
    }
}

impl From<UserId> for ChatPrincipalId {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}

impl From<AuthorId> for ChatPrincipalId {
    fn from(id: AuthorId) -> Self {
        Self::Author(id)
    }
}

impl From<&str> for ChatPrincipalId {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

// Serialized in wire form; deserialization goes through the total parser
impl Serialize for ChatPrincipalId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChatPrincipalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ChatPrincipalId::parse(&raw))
    }
}
