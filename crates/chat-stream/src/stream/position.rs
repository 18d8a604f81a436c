//! Stream positions
//!
//! A position is an opaque replay token. Callers may store it as a string and
//! hand it back later, but must only compare positions for equality.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque marker of a point in a stream's history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamPosition(String);

impl StreamPosition {
    /// Marker meaning "from the oldest buffered event"
    pub fn start() -> Self {
        Self::from_sequence(0)
    }

    pub fn is_start(&self) -> bool {
        *self == Self::start()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("{sequence:020}"))
    }
}

impl Default for StreamPosition {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StreamPosition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for StreamPosition {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
