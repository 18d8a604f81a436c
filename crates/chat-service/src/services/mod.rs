//! Service layer
//!
//! Services receive their collaborators explicitly, usually through a
//! `ServiceContext`.

pub mod context;
pub mod error;
pub mod mention;
pub mod permission;
pub mod principal;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use mention::{extract_mentions, Mention, MentionResolver, MentionResolverFactory};
pub use permission::PermissionChecker;
pub use principal::PrincipalResolver;
