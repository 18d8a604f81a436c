//! Application configuration structs
//!
//! Loads configuration from environment variables (and `.env` when present).

use serde::Deserialize;
use std::env;
use tracing::Level;

use crate::telemetry::TracingConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    #[serde(default)]
    pub stream: StreamSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Largest accepted per-stream buffer
pub const MAX_STREAM_CAPACITY: usize = 1 << 20;

/// Per-chat event stream settings
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSettings {
    /// Maximum number of buffered, unread events before publishers suspend
    #[serde(default = "default_stream_capacity")]
    pub capacity: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            capacity: default_stream_capacity(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the pretty format
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "chat-events".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_stream_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        let capacity = match lookup("EVENT_STREAM_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if (1..=MAX_STREAM_CAPACITY).contains(&value) => value,
                _ => return Err(ConfigError::InvalidValue("EVENT_STREAM_CAPACITY", raw)),
            },
            None => default_stream_capacity(),
        };

        let level = lookup("LOG_LEVEL").unwrap_or_else(default_log_level);
        if level.parse::<Level>().is_err() {
            return Err(ConfigError::InvalidValue("LOG_LEVEL", level));
        }

        let json = match lookup("LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("LOG_JSON", raw))?,
            None => env.is_production(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            stream: StreamSettings { capacity },
            telemetry: TelemetrySettings { level, json },
        })
    }

    /// Tracing setup matching the telemetry section
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let base = if self.app.env.is_production() {
            TracingConfig::production()
        } else {
            TracingConfig::development()
        };

        TracingConfig {
            level: self.telemetry.level.parse().unwrap_or(Level::INFO),
            json: self.telemetry.json,
            ..base
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
