//! # chat-stream
//!
//! Bounded, in-process event streams that carry chat domain events from any
//! number of producers to a single logical reader.
//!
//! ## Features
//!
//! - **Backpressure**: publishers suspend while the buffer is full
//! - **Ordering**: the reader observes events in enqueue order
//! - **Positions**: every delivered event is tagged with an opaque `StreamPosition`
//! - **Cancellation**: both publish and read race a `Cancellation` token
//!
//! ## Example
//!
//! ```ignore
//! use chat_common::Cancellation;
//! use chat_stream::{EventStream, StreamPosition};
//! use futures::StreamExt;
//!
//! let stream = EventStream::with_default_capacity();
//! stream.publish(event, &Cancellation::none()).await?;
//!
//! let mut events = Box::pin(stream.read(StreamPosition::start(), Cancellation::none()));
//! while let Some(item) = events.next().await {
//!     let (event, position) = item?;
//! }
//! ```

pub mod error;
pub mod stream;

pub use error::{StreamError, StreamResult};
pub use stream::{EventStream, EventStreamConfig, StreamPosition, DEFAULT_CAPACITY, MAX_CAPACITY};
