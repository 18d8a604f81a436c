//! Bounded event stream
//!
//! Producers enqueue through a bounded `mpsc` channel and suspend while it is
//! full. The single receiver lives behind an async mutex so that only one
//! reader drains at a time; positions are assigned on dequeue, which makes
//! position order equal to enqueue order.

use std::fmt;
use std::sync::Arc;

use chat_common::{Cancellation, CancellationSource};
use chat_core::ChatEvent;
use futures::Stream;
use tokio::sync::{mpsc, Mutex};

use super::config::{EventStreamConfig, DEFAULT_CAPACITY};
use super::position::StreamPosition;
use crate::error::{StreamError, StreamResult};

/// Bounded publish/read channel for one chat's events
///
/// Cloning is cheap; every clone publishes into the same buffer.
pub struct EventStream<T: ChatEvent> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    capacity: usize,
    sender: mpsc::Sender<T>,
    reader: Mutex<ReaderState<T>>,
    disposed: CancellationSource,
}

struct ReaderState<T> {
    receiver: mpsc::Receiver<T>,
    /// Sequence of the last delivered event
    sequence: u64,
}

/// Outcome of one dequeue attempt
enum Next<T> {
    Event(T, StreamPosition),
    Cancelled,
    Disposed,
}

impl<T: ChatEvent> EventStream<T> {
    /// Create a stream with the given buffer capacity
    pub fn new(config: EventStreamConfig) -> StreamResult<Self> {
        config.validate()?;
        Ok(Self::with_capacity_unchecked(config.capacity))
    }

    /// Create a stream buffering up to 1000 events
    pub fn with_default_capacity() -> Self {
        Self::with_capacity_unchecked(DEFAULT_CAPACITY)
    }

    fn with_capacity_unchecked(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        Self {
            inner: Arc::new(Inner {
                capacity,
                sender,
                reader: Mutex::new(ReaderState {
                    receiver,
                    sequence: 0,
                }),
                disposed: CancellationSource::new(),
            }),
        }
    }

    /// Enqueue an event, waiting for buffer space if necessary
    ///
    /// On cancellation or disposal the event is dropped and the buffer is
    /// left untouched.
    pub async fn publish(&self, event: T, cancel: &Cancellation) -> StreamResult<()> {
        if cancel.is_cancelled() {
            return Err(StreamError::Cancelled);
        }
        if self.is_disposed() {
            return Err(StreamError::Disposed);
        }

        let disposed = self.inner.disposed.token();
        let permit = tokio::select! {
            biased;

            () = cancel.cancelled() => {
                tracing::debug!(
                    chat_id = %event.chat_id(),
                    event_type = event.event_type(),
                    "Publish cancelled while waiting for buffer space"
                );
                return Err(StreamError::Cancelled);
            }

            () = disposed.cancelled() => return Err(StreamError::Disposed),

            permit = self.inner.sender.reserve() => {
                permit.map_err(|_| StreamError::Disposed)?
            }
        };

        tracing::trace!(
            chat_id = %event.chat_id(),
            event_type = event.event_type(),
            "Event published"
        );
        permit.send(event);
        Ok(())
    }

    /// Lazily read events together with their positions
    ///
    /// The sequence ends when `cancel` fires and yields a single
    /// `StreamError::Disposed` once the stream is disposed. Reading always
    /// starts at the oldest buffered event; `from` is only recorded.
    pub fn read(
        &self,
        from: StreamPosition,
        cancel: Cancellation,
    ) -> impl Stream<Item = StreamResult<(T, StreamPosition)>> + Send + 'static {
        if !from.is_start() {
            tracing::debug!(
                position = %from,
                "Seeking is not supported, reading from the oldest buffered event"
            );
        }

        let inner = Arc::clone(&self.inner);
        futures::stream::unfold(Some((inner, cancel)), |state| async move {
            let (inner, cancel) = state?;
            match inner.next(&cancel).await {
                Next::Event(event, position) => {
                    Some((Ok((event, position)), Some((inner, cancel))))
                }
                Next::Cancelled => None,
                Next::Disposed => Some((Err(StreamError::Disposed), None)),
            }
        })
    }

    /// Close the stream, waking every suspended publisher and reader
    pub fn dispose(&self) {
        if !self.inner.disposed.is_cancelled() {
            tracing::info!(buffered = self.len(), "Event stream disposed");
        }
        self.inner.disposed.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.is_cancelled()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Number of published events not yet read
    pub fn len(&self) -> usize {
        self.inner.sender.max_capacity() - self.inner.sender.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Inner<T> {
    async fn next(&self, cancel: &Cancellation) -> Next<T> {
        if cancel.is_cancelled() {
            return Next::Cancelled;
        }

        let disposed = self.disposed.token();
        let mut reader = tokio::select! {
            biased;
            () = cancel.cancelled() => return Next::Cancelled,
            () = disposed.cancelled() => return Next::Disposed,
            guard = self.reader.lock() => guard,
        };

        let event = tokio::select! {
            biased;
            () = cancel.cancelled() => return Next::Cancelled,
            () = disposed.cancelled() => return Next::Disposed,
            event = reader.receiver.recv() => event,
        };

        match event {
            Some(event) => {
                reader.sequence += 1;
                Next::Event(event, StreamPosition::from_sequence(reader.sequence))
            }
            None => Next::Disposed,
        }
    }
}

impl<T: ChatEvent> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ChatEvent> Default for EventStream<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<T: ChatEvent> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
