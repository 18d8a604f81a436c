//! Stream errors

use chat_common::AppError;

/// Error type for event stream operations
///
/// A full buffer is never an error; publishers wait instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("Stream operation cancelled")]
    Cancelled,

    #[error("Event stream disposed")]
    Disposed,

    #[error("Invalid stream capacity: {0}")]
    InvalidCapacity(usize),
}

impl StreamError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::Disposed => "STREAM_DISPOSED",
            Self::InvalidCapacity(_) => "INVALID_STREAM_CAPACITY",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

impl From<StreamError> for AppError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Cancelled => Self::Cancelled,
            StreamError::Disposed => Self::StreamClosed,
            StreamError::InvalidCapacity(_) => Self::Config(err.to_string()),
        }
    }
}
