//! # chat-core
//!
//! Domain layer containing identity value objects, chat permissions, the chat
//! author entity, domain events and the author directory port.
//! This crate has zero dependencies on infrastructure (runtime, storage, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::ChatAuthor;
pub use error::DomainError;
pub use events::{ChatDomainEvent, ChatEvent};
pub use traits::{AuthorDirectory, RepoResult};
pub use value_objects::{AuthorId, ChatId, ChatPermissions, ChatPrincipalId, PrincipalKind, UserId};
