//! Domain events published into per-chat event streams

mod domain_event;

pub use domain_event::{
    AuthorClaimedEvent, AuthorJoinedEvent, AuthorLeftEvent, ChatDomainEvent, ChatEvent,
    MessagePostedEvent,
};
