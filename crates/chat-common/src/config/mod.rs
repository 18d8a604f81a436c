//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, Environment, StreamSettings, TelemetrySettings,
    MAX_STREAM_CAPACITY,
};
