//! Chat permission bitflags
//!
//! Bit positions are shared with stored permission snapshots: new permissions
//! take unused bits, existing ones are never renumbered.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Permissions a principal holds inside one chat
    ///
    /// Serialized as a decimal string in JSON for JavaScript safety.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChatPermissions: u64 {
        /// Read chat entries
        const READ            = 1 << 0;
        /// Post chat entries
        const WRITE           = 1 << 1;
        /// Join the chat
        const JOIN            = 1 << 2;
        /// Invite other users
        const INVITE          = 1 << 3;
        /// See the author list
        const SEE_MEMBERS     = 1 << 4;
        /// Leave the chat
        const LEAVE           = 1 << 5;
        /// Edit title, visibility and other chat properties
        const EDIT_PROPERTIES = 1 << 6;
        /// Edit chat roles
        const EDIT_ROLES      = 1 << 7;
        /// Administrative operations
        const ADMIN           = 1 << 8;

        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();

        /// Regular member of a chat
        const MEMBER = Self::READ.bits()
            | Self::WRITE.bits()
            | Self::JOIN.bits()
            | Self::INVITE.bits()
            | Self::SEE_MEMBERS.bits()
            | Self::LEAVE.bits();

        /// Chat owner: every defined permission
        const OWNER = Self::MEMBER.bits()
            | Self::EDIT_PROPERTIES.bits()
            | Self::EDIT_ROLES.bits()
            | Self::ADMIN.bits();
    }
}

const NAMED: [(ChatPermissions, &str); 9] = [
    (ChatPermissions::READ, "READ"),
    (ChatPermissions::WRITE, "WRITE"),
    (ChatPermissions::JOIN, "JOIN"),
    (ChatPermissions::INVITE, "INVITE"),
    (ChatPermissions::SEE_MEMBERS, "SEE_MEMBERS"),
    (ChatPermissions::LEAVE, "LEAVE"),
    (ChatPermissions::EDIT_PROPERTIES, "EDIT_PROPERTIES"),
    (ChatPermissions::EDIT_ROLES, "EDIT_ROLES"),
    (ChatPermissions::ADMIN, "ADMIN"),
];

impl ChatPermissions {
    /// No permissions
    pub const NONE: Self = Self::empty();

    /// Check that every required bit is held
    ///
    /// There is no implicit escalation: `ADMIN` satisfies only itself.
    #[inline]
    pub fn has_all(&self, required: ChatPermissions) -> bool {
        (*self & required) == required
    }

    /// Bits of `required` that are not held
    #[inline]
    pub fn missing(&self, required: ChatPermissions) -> ChatPermissions {
        required - *self
    }

    /// Default permissions derived from chat ownership and visibility
    pub fn for_role(is_owner: bool, is_public: bool) -> Self {
        if is_owner {
            Self::OWNER
        } else if is_public {
            Self::READ
        } else {
            Self::NONE
        }
    }

    /// Get the raw bits as i64 (for storage)
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    /// Create from raw i64 bits, dropping unknown bits
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Self::from_bits_truncate(bits as u64)
    }

    /// Parse from string representation (decimal number)
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        s.parse::<u64>().map(Self::from_bits_truncate)
    }

    /// Names of the individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for ChatPermissions {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for ChatPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl Serialize for ChatPermissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

// Deserialize from string or number
impl<'de> Deserialize<'de> for ChatPermissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = ChatPermissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_i64<E>(self, value: i64) -> Result<ChatPermissions, E>
            where
                E: de::Error,
            {
                Ok(ChatPermissions::from_bits_truncate(value as u64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<ChatPermissions, E>
            where
                E: de::Error,
            {
                Ok(ChatPermissions::from_bits_truncate(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<ChatPermissions, E>
            where
                E: de::Error,
            {
                ChatPermissions::parse(value)
                    .map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<u64> for ChatPermissions {
    fn from(bits: u64) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<ChatPermissions> for u64 {
    fn from(perms: ChatPermissions) -> Self {
        perms.bits()
    }
}
