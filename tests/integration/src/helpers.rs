//! Test helpers for integration tests
//!
//! Provides utilities for building a wired service context and draining
//! event streams with timeouts.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chat_common::{try_init_tracing_with_config, AppConfig, Cancellation};
use chat_core::ChatEvent;
use chat_service::ServiceContext;
use chat_store::MemoryAuthorDirectory;
use chat_stream::{EventStream, StreamPosition};
use futures::StreamExt;

/// Upper bound for anything that is expected to complete
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(2);

/// How long an operation must stay pending to count as suspended
pub const SUSPENSION_WINDOW: Duration = Duration::from_millis(50);

/// Fully wired test environment
pub struct TestContext {
    pub config: AppConfig,
    pub directory: Arc<MemoryAuthorDirectory>,
    pub services: ServiceContext,
}

impl TestContext {
    /// Context with default configuration
    pub fn start() -> Result<Self> {
        Self::start_with(&[])
    }

    /// Context with configuration built from the given variables
    pub fn start_with(vars: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(vars)?;
        init_test_tracing(&config);

        let directory = MemoryAuthorDirectory::new_shared();
        let services = ServiceContext::from_config(&config, directory.clone())?;

        Ok(Self {
            config,
            directory,
            services,
        })
    }
}

/// Create a test configuration from explicit variables only
pub fn test_config(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Install the tracing subscriber once per test binary
pub fn init_test_tracing(config: &AppConfig) {
    // Every test after the first gets AlreadyInitialized
    let _ = try_init_tracing_with_config(config.tracing_config());
}

/// Read `count` events from the start of `stream`
pub async fn drain<T: ChatEvent>(
    stream: &EventStream<T>,
    count: usize,
) -> Result<Vec<(T, StreamPosition)>> {
    let read = stream
        .read(StreamPosition::start(), Cancellation::none())
        .take(count)
        .collect::<Vec<_>>();

    let items = tokio::time::timeout(COMPLETION_TIMEOUT, read)
        .await
        .map_err(|_| anyhow::anyhow!("Timed out draining {count} events"))?;

    items
        .into_iter()
        .map(|item| item.map_err(anyhow::Error::from))
        .collect()
}

/// True if `future` is still pending after the suspension window
pub async fn stays_pending<F: Future>(future: F) -> bool {
    tokio::time::timeout(SUSPENSION_WINDOW, future).await.is_err()
}
