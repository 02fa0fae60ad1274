//! Single source of truth for configured/authorized platforms.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use platform_publishers::PlatformId;
use tracing::{debug, info};

use crate::config::ConfigSource;

use super::types::PlatformCredentials;

/// In-memory credential store backed by an environment-style config source.
///
/// Only configured platforms (client id + secret both present) get an entry;
/// everything else is simply absent, so lookups never fail. Tokens are
/// process-lifetime only: a restart requires re-authorization, matching the
/// transient-storage design of the service.
pub struct CredentialStore {
    source: Arc<dyn ConfigSource>,
    inner: RwLock<BTreeMap<PlatformId, PlatformCredentials>>,
}

impl CredentialStore {
    /// Create an empty store; call [`Self::reload`] to populate it.
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create and immediately populate a store from the source.
    pub fn from_source(source: Arc<dyn ConfigSource>) -> Self {
        let store = Self::new(source);
        store.reload();
        store
    }

    /// Re-read app-level credentials from the config source.
    ///
    /// Missing values leave that platform unconfigured. Access and refresh
    /// tokens already stored for still-configured platforms survive a reload;
    /// seed tokens from the source are only picked up when no live token
    /// exists.
    pub fn reload(&self) {
        let mut fresh = BTreeMap::new();

        for platform in PlatformId::ALL {
            let prefix = platform.env_prefix();
            let client_id = self.source.get(&format!("{prefix}_CLIENT_ID"));
            let client_secret = self.source.get(&format!("{prefix}_CLIENT_SECRET"));

            let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
                debug!(platform = %platform, "platform not configured");
                continue;
            };

            let mut credentials = PlatformCredentials::new(platform, client_id, client_secret);
            credentials.access_token = self.source.get(&format!("{prefix}_ACCESS_TOKEN"));
            credentials.refresh_token = self.source.get(&format!("{prefix}_REFRESH_TOKEN"));
            fresh.insert(platform, credentials);
        }

        let mut inner = self.inner.write();
        for (platform, live) in inner.iter() {
            if let Some(entry) = fresh.get_mut(platform) {
                if entry.access_token.is_none() {
                    entry.access_token = live.access_token.clone();
                }
                if entry.refresh_token.is_none() {
                    entry.refresh_token = live.refresh_token.clone();
                }
            }
        }
        let configured = fresh.len();
        *inner = fresh;
        info!(configured, "credential store reloaded");
    }

    /// True iff the platform has app-level client credentials.
    pub fn is_configured(&self, platform: PlatformId) -> bool {
        self.inner.read().contains_key(&platform)
    }

    /// True iff the platform is configured and holds a user access token.
    pub fn is_authorized(&self, platform: PlatformId) -> bool {
        self.inner
            .read()
            .get(&platform)
            .is_some_and(|c| c.is_authorized())
    }

    /// Configured platforms in fixed priority order.
    pub fn list_configured(&self) -> Vec<PlatformId> {
        let inner = self.inner.read();
        PlatformId::ALL
            .into_iter()
            .filter(|platform| inner.contains_key(platform))
            .collect()
    }

    /// Store a user access token.
    ///
    /// Returns `false` when the platform was never configured: an
    /// unconfigured platform cannot be authorized. This is the only mutation
    /// path post-construction besides token refresh, and it never suspends.
    pub fn set_access_token(&self, platform: PlatformId, token: impl Into<String>) -> bool {
        let mut inner = self.inner.write();
        match inner.get_mut(&platform) {
            Some(credentials) => {
                credentials.access_token = Some(token.into());
                true
            }
            None => false,
        }
    }

    /// Store a refresh token delivered alongside an access token.
    pub fn set_refresh_token(&self, platform: PlatformId, token: impl Into<String>) -> bool {
        let mut inner = self.inner.write();
        match inner.get_mut(&platform) {
            Some(credentials) => {
                credentials.refresh_token = Some(token.into());
                true
            }
            None => false,
        }
    }

    /// Current access token, if the platform is authorized.
    pub fn access_token(&self, platform: PlatformId) -> Option<String> {
        self.inner
            .read()
            .get(&platform)
            .and_then(|c| c.access_token.clone())
    }

    /// Snapshot of a platform's credentials, if configured.
    pub fn credentials(&self, platform: PlatformId) -> Option<PlatformCredentials> {
        self.inner.read().get(&platform).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigSource;

    fn source_with_youtube() -> Arc<MemoryConfigSource> {
        let source = MemoryConfigSource::new();
        source.set("YOUTUBE_CLIENT_ID", "yt-app");
        source.set("YOUTUBE_CLIENT_SECRET", "yt-secret");
        Arc::new(source)
    }

    #[test]
    fn unconfigured_platform_is_reported_false() {
        let store = CredentialStore::from_source(source_with_youtube());

        assert!(store.is_configured(PlatformId::Youtube));
        assert!(!store.is_configured(PlatformId::Tiktok));
        assert!(!store.is_authorized(PlatformId::Youtube));
    }

    #[test]
    fn set_access_token_on_unconfigured_platform_returns_false() {
        let store = CredentialStore::from_source(Arc::new(MemoryConfigSource::new()));

        assert!(!store.set_access_token(PlatformId::Youtube, "tok123"));
        assert!(store.access_token(PlatformId::Youtube).is_none());
        assert!(store.list_configured().is_empty());
    }

    #[test]
    fn set_access_token_authorizes_configured_platform() {
        let store = CredentialStore::from_source(source_with_youtube());

        assert!(store.set_access_token(PlatformId::Youtube, "tok123"));
        assert!(store.is_authorized(PlatformId::Youtube));
        assert_eq!(
            store.access_token(PlatformId::Youtube),
            Some("tok123".to_string())
        );
    }

    #[test]
    fn list_configured_is_ordered_and_idempotent() {
        let source = MemoryConfigSource::new();
        source.set("INSTAGRAM_CLIENT_ID", "ig-app");
        source.set("INSTAGRAM_CLIENT_SECRET", "ig-secret");
        source.set("YOUTUBE_CLIENT_ID", "yt-app");
        source.set("YOUTUBE_CLIENT_SECRET", "yt-secret");
        let store = CredentialStore::from_source(Arc::new(source));

        let first = store.list_configured();
        let second = store.list_configured();
        assert_eq!(first, vec![PlatformId::Youtube, PlatformId::Instagram]);
        assert_eq!(first, second);
    }

    #[test]
    fn reload_keeps_live_tokens_for_still_configured_platforms() {
        let source = source_with_youtube();
        let store = CredentialStore::from_source(source.clone());
        store.set_access_token(PlatformId::Youtube, "live-token");

        store.reload();
        assert_eq!(
            store.access_token(PlatformId::Youtube),
            Some("live-token".to_string())
        );

        // Dropping the secret unconfigures the platform and its token.
        source.remove("YOUTUBE_CLIENT_SECRET");
        store.reload();
        assert!(!store.is_configured(PlatformId::Youtube));
        assert!(store.access_token(PlatformId::Youtube).is_none());
    }

    #[test]
    fn reload_picks_up_seed_tokens() {
        let source = source_with_youtube();
        source.set("YOUTUBE_ACCESS_TOKEN", "seed-token");
        let store = CredentialStore::from_source(source);

        assert!(store.is_authorized(PlatformId::Youtube));
        assert_eq!(
            store.access_token(PlatformId::Youtube),
            Some("seed-token".to_string())
        );
    }
}
