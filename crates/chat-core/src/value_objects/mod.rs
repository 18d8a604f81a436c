//! Value objects - immutable types that represent domain concepts

mod author_id;
mod chat_id;
mod permissions;
mod principal_id;

pub use author_id::AuthorId;
pub use chat_id::{ChatId, UserId};
pub use permissions::ChatPermissions;
pub use principal_id::{ChatPrincipalId, PrincipalKind};
