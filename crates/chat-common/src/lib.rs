//! # chat-common
//!
//! Shared utilities including configuration, error handling, cancellation,
//! and telemetry.

pub mod cancel;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use cancel::{Cancellation, CancellationSource};
pub use config::{
    AppConfig, AppSettings, ConfigError, Environment, StreamSettings, TelemetrySettings,
    MAX_STREAM_CAPACITY,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
