//! Cooperative cancellation signals

mod token;

pub use token::{Cancellation, CancellationSource};
