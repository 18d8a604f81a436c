//! Service context - dependency container for services
//!
//! Holds the author directory and stream settings, and hands out the
//! services built on top of them.

use std::sync::Arc;

use chat_common::AppConfig;
use chat_core::traits::AuthorDirectory;
use chat_core::ChatEvent;
use chat_stream::{EventStream, EventStreamConfig};

use super::error::{ServiceError, ServiceResult};
use super::mention::MentionResolverFactory;
use super::permission::PermissionChecker;
use super::principal::PrincipalResolver;

/// Service context containing all dependencies
///
/// Collaborators are injected explicitly; nothing is looked up at runtime.
#[derive(Clone)]
pub struct ServiceContext {
    author_directory: Arc<dyn AuthorDirectory>,
    stream_config: EventStreamConfig,
}

impl ServiceContext {
    pub fn new(author_directory: Arc<dyn AuthorDirectory>, stream_config: EventStreamConfig) -> Self {
        Self {
            author_directory,
            stream_config,
        }
    }

    /// Build a context from loaded configuration
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the stream settings are out of range
    pub fn from_config(
        config: &AppConfig,
        author_directory: Arc<dyn AuthorDirectory>,
    ) -> ServiceResult<Self> {
        let stream_config = EventStreamConfig::from(&config.stream);
        stream_config.validate()?;
        Ok(Self::new(author_directory, stream_config))
    }

    /// Get the author directory
    pub fn author_directory(&self) -> &dyn AuthorDirectory {
        self.author_directory.as_ref()
    }

    pub fn stream_config(&self) -> EventStreamConfig {
        self.stream_config
    }

    pub fn principal_resolver(&self) -> PrincipalResolver {
        PrincipalResolver::new(Arc::clone(&self.author_directory))
    }

    pub fn mention_resolvers(&self) -> MentionResolverFactory {
        MentionResolverFactory::new(Arc::clone(&self.author_directory))
    }

    pub fn permission_checker(&self) -> PermissionChecker {
        PermissionChecker::new()
    }

    /// Create an event stream with the configured capacity
    pub fn event_stream<T: ChatEvent>(&self) -> ServiceResult<EventStream<T>> {
        Ok(EventStream::new(self.stream_config)?)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("author_directory", &"AuthorDirectory")
            .field("stream_config", &self.stream_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    author_directory: Option<Arc<dyn AuthorDirectory>>,
    stream_config: Option<EventStreamConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author_directory(mut self, directory: Arc<dyn AuthorDirectory>) -> Self {
        self.author_directory = Some(directory);
        self
    }

    pub fn stream_config(mut self, config: EventStreamConfig) -> Self {
        self.stream_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the author directory is missing
    /// or the stream configuration is invalid
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let author_directory = self
            .author_directory
            .ok_or_else(|| ServiceError::validation("author_directory is required"))?;
        let stream_config = self.stream_config.unwrap_or_default();
        stream_config.validate()?;

        Ok(ServiceContext::new(author_directory, stream_config))
    }
}
