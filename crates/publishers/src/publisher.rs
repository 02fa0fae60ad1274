//! Base publisher and the uniform per-platform contract.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::default::DEFAULT_UPLOAD_TIMEOUT;
use crate::error::PublishError;
use crate::platform::PlatformId;
use crate::result::{FailureReason, PublishResult, RemoteVideo};

/// A resolved, readable media asset plus the metadata to publish with it.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Local path the orchestrator already resolved and verified readable.
    pub media_path: &'a Path,
}

/// Base publisher shared by every platform adapter.
///
/// Holds the HTTP client and the platform's API base URL. The base URL is
/// overridable so tests can point an adapter at a local server.
#[derive(Debug, Clone)]
pub struct Publisher {
    platform: PlatformId,
    pub client: Client,
    base_url: String,
    timeout: Duration,
}

impl Publisher {
    pub fn new<S: Into<String>>(platform: PlatformId, client: Client, base_url: S) -> Self {
        Self {
            platform,
            client,
            base_url: base_url.into(),
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url<S: Into<String>>(&mut self, base_url: S) {
        self.base_url = base_url.into();
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Read the media file into memory for a multipart upload.
    pub async fn read_media(&self, path: &Path) -> Result<Vec<u8>, PublishError> {
        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(PublishError::InvalidMedia(format!(
                "media file {} is empty",
                path.display()
            )));
        }
        debug!(
            platform = %self.platform,
            size = bytes.len(),
            "read media for upload"
        );
        Ok(bytes)
    }
}

#[async_trait]
pub trait PlatformPublisher: Send + Sync {
    fn publisher(&self) -> &Publisher;

    fn platform(&self) -> PlatformId {
        self.publisher().platform()
    }

    /// Perform the platform's upload call with a known-present access token.
    ///
    /// Implementations may fail freely; [`Self::publish`] converts every
    /// error into a structured result.
    async fn try_upload(
        &self,
        upload: &UploadRequest<'_>,
        access_token: &str,
    ) -> Result<RemoteVideo, PublishError>;

    /// Uniform publish contract.
    ///
    /// No access token means no network call at all, and a transport or
    /// provider error (including timeout) becomes a `PROVIDER_ERROR` result.
    /// Errors never propagate past this method.
    async fn publish(
        &self,
        upload: &UploadRequest<'_>,
        access_token: Option<&str>,
    ) -> PublishResult {
        let platform = self.platform();
        let name = platform.display_name();

        let Some(token) = access_token else {
            return PublishResult::failure(
                platform.to_string(),
                FailureReason::NotAuthorized,
                format!("{name} not authorized. Please connect your {name} account."),
            );
        };

        let outcome =
            match tokio::time::timeout(self.publisher().timeout(), self.try_upload(upload, token))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(PublishError::Timeout),
            };

        match outcome {
            Ok(remote) => {
                debug!(platform = %platform, remote_url = %remote.url, "upload succeeded");
                PublishResult::success(
                    platform.to_string(),
                    remote.url,
                    format!("Video successfully published to {name}"),
                )
            }
            Err(error) => {
                warn!(platform = %platform, error = %error, "upload failed");
                PublishResult::failure(
                    platform.to_string(),
                    FailureReason::ProviderError,
                    format!("Failed to publish to {name}. Please try again later."),
                )
            }
        }
    }
}
