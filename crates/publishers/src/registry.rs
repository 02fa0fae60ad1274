//! Adapter lookup keyed by platform.

use std::sync::Arc;

use reqwest::Client;

use crate::platform::PlatformId;
use crate::platforms::{
    instagram::InstagramPublisher, tiktok::TiktokPublisher, youtube::YoutubePublisher,
};
use crate::publisher::PlatformPublisher;

/// Registry of platform adapters.
///
/// Lookup is by the closed [`PlatformId`] enum, so an unsupported request can
/// never reach an adapter by accident.
#[derive(Default)]
pub struct PublisherRegistry {
    publishers: Vec<Arc<dyn PlatformPublisher>>,
}

impl PublisherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all built-in adapters sharing one HTTP client.
    pub fn with_defaults(client: Client) -> Self {
        let mut registry = Self::new();
        registry
            .register(Arc::new(YoutubePublisher::new(client.clone())))
            .register(Arc::new(TiktokPublisher::new(client.clone())))
            .register(Arc::new(InstagramPublisher::new(client)));
        registry
    }

    /// Register an adapter, replacing any existing one for the same platform.
    pub fn register(&mut self, publisher: Arc<dyn PlatformPublisher>) -> &mut Self {
        self.publishers
            .retain(|existing| existing.platform() != publisher.platform());
        self.publishers.push(publisher);
        self
    }

    pub fn get(&self, platform: PlatformId) -> Option<Arc<dyn PlatformPublisher>> {
        self.publishers
            .iter()
            .find(|publisher| publisher.platform() == platform)
            .cloned()
    }

    /// Platforms with a registered adapter, in registration order.
    pub fn platforms(&self) -> Vec<PlatformId> {
        self.publishers
            .iter()
            .map(|publisher| publisher.platform())
            .collect()
    }
}
