//! Event stream configuration

use chat_common::{StreamSettings, MAX_STREAM_CAPACITY};

use crate::error::{StreamError, StreamResult};

/// Buffer size used when nothing else is configured
pub const DEFAULT_CAPACITY: usize = 1000;

/// Upper bound accepted for a single stream buffer
pub const MAX_CAPACITY: usize = MAX_STREAM_CAPACITY;

/// Configuration for an event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStreamConfig {
    /// Number of published but unread events held before publishers suspend
    pub capacity: usize,
}

impl EventStreamConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the configuration before a buffer is allocated
    pub fn validate(&self) -> StreamResult<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(StreamError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for EventStreamConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl From<&StreamSettings> for EventStreamConfig {
    fn from(settings: &StreamSettings) -> Self {
        Self {
            capacity: settings.capacity,
        }
    }
}
