//! TikTok share API upload adapter.
//!
//! Posts the media as a single multipart `video` field against the open API
//! upload endpoint; the access token travels as a query parameter per the
//! share protocol.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::PublishError;
use crate::platform::PlatformId;
use crate::publisher::{PlatformPublisher, Publisher, UploadRequest};
use crate::result::RemoteVideo;

const API_BASE_URL: &str = "https://open-api.tiktok.com";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
    #[serde(default)]
    error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(default)]
    share_id: String,
}

#[derive(Debug, Deserialize)]
struct UploadError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

pub struct TiktokPublisher {
    publisher: Publisher,
}

impl TiktokPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            publisher: Publisher::new(PlatformId::Tiktok, client, API_BASE_URL),
        }
    }

    /// Point the adapter at a different API host (tests).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.publisher.set_base_url(base_url);
        self
    }
}

#[async_trait]
impl PlatformPublisher for TiktokPublisher {
    fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    async fn try_upload(
        &self,
        upload: &UploadRequest<'_>,
        access_token: &str,
    ) -> Result<RemoteVideo, PublishError> {
        let bytes = self.publisher.read_media(upload.media_path).await?;

        let form = Form::new().part(
            "video",
            Part::bytes(bytes)
                .file_name(format!("{}.mp4", upload.title))
                .mime_str("video/mp4")?,
        );

        let url = format!("{}/share/video/upload/", self.publisher.base_url());
        let response = self
            .publisher
            .client
            .post(&url)
            .query(&[("access_token", access_token)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Provider(format!(
                "tiktok upload returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response.json().await?;
        if let Some(error) = uploaded.error
            && error.code != 0
        {
            return Err(PublishError::Provider(format!(
                "tiktok error {}: {}",
                error.code, error.message
            )));
        }
        if uploaded.data.share_id.is_empty() {
            return Err(PublishError::Provider(
                "tiktok response missing share_id".to_string(),
            ));
        }

        let url = format!("https://www.tiktok.com/video/{}", uploaded.data.share_id);
        Ok(RemoteVideo {
            id: uploaded.data.share_id,
            url,
        })
    }
}
