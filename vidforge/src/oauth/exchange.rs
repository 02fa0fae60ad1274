//! Token exchange against platform token endpoints.
//!
//! The exchange is a real HTTPS form POST with a bounded timeout. It sits
//! behind [`TokenExchanger`] so the callback flow can be tested without the
//! network.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use platform_publishers::PlatformId;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::credentials::{CredentialError, PlatformCredentials};

const YOUTUBE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const TIKTOK_TOKEN_ENDPOINT: &str = "https://open.tiktokapis.com/v2/oauth/token/";
const INSTAGRAM_TOKEN_ENDPOINT: &str = "https://api.instagram.com/oauth/access_token";

/// Bound on a single token endpoint call.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Tokens returned by a successful exchange or refresh.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireTokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Exchanges an authorization code (or refresh token) for tokens.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange a single-use authorization code.
    async fn exchange_code(
        &self,
        credentials: &PlatformCredentials,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, CredentialError>;

    /// Exchange a stored refresh token for a fresh access token.
    async fn refresh(
        &self,
        credentials: &PlatformCredentials,
    ) -> Result<TokenResponse, CredentialError>;
}

/// Production exchanger performing the platform token protocol over HTTPS.
pub struct HttpTokenExchanger {
    client: Client,
    /// Endpoint overrides for tests.
    endpoints: HashMap<PlatformId, String>,
}

impl HttpTokenExchanger {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoints: HashMap::new(),
        }
    }

    /// Point one platform's token endpoint somewhere else (tests).
    pub fn with_endpoint(mut self, platform: PlatformId, endpoint: impl Into<String>) -> Self {
        self.endpoints.insert(platform, endpoint.into());
        self
    }

    fn endpoint(&self, platform: PlatformId) -> &str {
        self.endpoints
            .get(&platform)
            .map(String::as_str)
            .unwrap_or(match platform {
                PlatformId::Youtube => YOUTUBE_TOKEN_ENDPOINT,
                PlatformId::Tiktok => TIKTOK_TOKEN_ENDPOINT,
                PlatformId::Instagram => INSTAGRAM_TOKEN_ENDPOINT,
            })
    }

    /// TikTok names the app credential fields differently.
    fn client_id_field(platform: PlatformId) -> &'static str {
        match platform {
            PlatformId::Tiktok => "client_key",
            _ => "client_id",
        }
    }

    async fn post_form(
        &self,
        platform: PlatformId,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, CredentialError> {
        let response = self
            .client
            .post(self.endpoint(platform))
            .timeout(EXCHANGE_TIMEOUT)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body: WireTokenResponse = response.json().await?;

        if let Some(error) = body.error {
            let description = body.error_description.unwrap_or_default();
            return Err(CredentialError::ExchangeRejected(format!(
                "{error}: {description}"
            )));
        }
        if !status.is_success() {
            return Err(CredentialError::ExchangeRejected(format!(
                "token endpoint returned {status}"
            )));
        }
        if body.access_token.is_empty() {
            return Err(CredentialError::InvalidResponse(
                "response carried no access_token".to_string(),
            ));
        }

        debug!(platform = %platform, "token exchange completed");
        Ok(TokenResponse {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in,
        })
    }
}

#[async_trait]
impl TokenExchanger for HttpTokenExchanger {
    async fn exchange_code(
        &self,
        credentials: &PlatformCredentials,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, CredentialError> {
        let platform = credentials.platform;
        self.post_form(
            platform,
            &[
                (Self::client_id_field(platform), &credentials.client_id),
                ("client_secret", &credentials.client_secret),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ],
        )
        .await
    }

    async fn refresh(
        &self,
        credentials: &PlatformCredentials,
    ) -> Result<TokenResponse, CredentialError> {
        let platform = credentials.platform;
        let Some(refresh_token) = credentials.refresh_token.as_deref() else {
            return Err(CredentialError::MissingRefreshToken(platform));
        };

        self.post_form(
            platform,
            &[
                (Self::client_id_field(platform), &credentials.client_id),
                ("client_secret", &credentials.client_secret),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ],
        )
        .await
    }
}
