//! Event stream types

mod config;
mod event_stream;
mod position;

pub use config::{EventStreamConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use event_stream::EventStream;
pub use position::StreamPosition;
