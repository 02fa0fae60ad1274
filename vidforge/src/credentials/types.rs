//! Core credential types.

use platform_publishers::PlatformId;

/// OAuth credentials for one platform.
///
/// An instance only exists in the store when the platform is configured,
/// i.e. both the client id and the client secret are present. A platform is
/// additionally "authorized" once a user access token has been stored.
#[derive(Clone)]
pub struct PlatformCredentials {
    pub platform: PlatformId,
    /// Platform-issued application id (`client_key` on TikTok).
    pub client_id: String,
    pub client_secret: String,
    /// Present iff the user completed the OAuth flow this process lifetime.
    pub access_token: Option<String>,
    /// Long-lived refresh token; only YouTube returns one in practice.
    pub refresh_token: Option<String>,
}

impl PlatformCredentials {
    pub fn new(
        platform: PlatformId,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: None,
            refresh_token: None,
        }
    }

    #[inline]
    pub fn is_authorized(&self) -> bool {
        self.access_token.is_some()
    }

    #[inline]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

// Keep secrets and tokens out of logs.
impl std::fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformCredentials")
            .field("platform", &self.platform)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
