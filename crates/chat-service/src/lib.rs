//! # chat-service
//!
//! Application layer: resolves chat principals to accounts, resolves
//! mentions inside one chat, checks permission bitmasks and wires event
//! streams from configuration.

pub mod services;

pub use services::{
    extract_mentions, Mention, MentionResolver, MentionResolverFactory, PermissionChecker,
    PrincipalResolver, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
