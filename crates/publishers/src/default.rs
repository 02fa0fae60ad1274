use std::time::Duration;

use reqwest::Client;

use crate::registry::PublisherRegistry;

pub(crate) const DEFAULT_UA: &str = "vidforge/0.1 (+https://github.com/vidforge/vidforge)";

/// Bound on a single upload attempt, including the request body transfer.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Connect-level timeout for provider calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared HTTP client used by all adapters.
///
/// Every outbound call carries a bounded timeout; a hung provider surfaces as
/// a per-platform failure instead of stalling the batch.
pub fn default_client() -> Client {
    Client::builder()
        .user_agent(DEFAULT_UA)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(DEFAULT_UPLOAD_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Returns a [`PublisherRegistry`] populated with all supported platforms.
pub fn default_registry() -> PublisherRegistry {
    PublisherRegistry::with_defaults(default_client())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The TLS stack must come fully wired; constructing the shared client is
    // the first thing service startup does.
    #[test]
    fn default_client_builds_without_panicking() {
        let _client = default_client();
    }

    #[test]
    fn default_registry_covers_all_platforms() {
        use crate::platform::PlatformId;

        let registry = default_registry();
        for platform in PlatformId::ALL {
            assert!(registry.get(platform).is_some());
        }
    }
}
