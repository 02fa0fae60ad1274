//! Service container for dependency injection.
//!
//! The ServiceContainer wires up all application services
//! and manages their lifecycle.

use std::sync::Arc;

use platform_publishers::{PublisherRegistry, default_client, default_registry};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::activity::TracingActivityLog;
use crate::config::{AppConfig, ConfigSource, EnvConfigSource};
use crate::credentials::CredentialStore;
use crate::media::MediaResolver;
use crate::oauth::{HttpTokenExchanger, OauthService};
use crate::publish::PublishService;
use crate::videos::InMemoryVideoStore;

/// Service container holding all application services.
pub struct ServiceContainer {
    pub credential_store: Arc<CredentialStore>,
    pub publisher_registry: Arc<PublisherRegistry>,
    pub oauth_service: Arc<OauthService>,
    pub video_store: Arc<InMemoryVideoStore>,
    pub publish_service: Arc<PublishService>,
    /// Cancellation token for graceful shutdown.
    cancellation_token: CancellationToken,
}

impl ServiceContainer {
    /// Wire up all services from the process environment.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_source(config, Arc::new(EnvConfigSource))
    }

    /// Wire up all services against a custom config source.
    pub fn with_source(config: &AppConfig, source: Arc<dyn ConfigSource>) -> Self {
        info!("Initializing service container");

        let credential_store = Arc::new(CredentialStore::from_source(source));
        let publisher_registry = Arc::new(default_registry());

        let exchanger = Arc::new(HttpTokenExchanger::new(default_client()));
        let oauth_service = Arc::new(OauthService::new(credential_store.clone(), exchanger));

        let video_store = Arc::new(InMemoryVideoStore::new());
        let publish_service = Arc::new(PublishService::new(
            credential_store.clone(),
            publisher_registry.clone(),
            video_store.clone(),
            Arc::new(TracingActivityLog),
            MediaResolver::new(&config.media_root),
        ));

        Self {
            credential_store,
            publisher_registry,
            oauth_service,
            video_store,
            publish_service,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Token observed by the server and in-flight publishes.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Signal every service to stop.
    pub fn shutdown(&self) {
        info!("Shutting down services");
        self.cancellation_token.cancel();
    }
}
