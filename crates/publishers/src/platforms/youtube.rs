//! YouTube Data API v3 upload adapter.
//!
//! Uses the multipart upload protocol: one JSON metadata part (snippet +
//! status) and one media part, authorized with the user's OAuth bearer token.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;

use crate::error::PublishError;
use crate::platform::PlatformId;
use crate::publisher::{PlatformPublisher, Publisher, UploadRequest};
use crate::result::RemoteVideo;

const API_BASE_URL: &str = "https://www.googleapis.com";

/// Videos uploaded on behalf of the user default to private; the user flips
/// visibility in YouTube Studio once they have reviewed the result.
const DEFAULT_PRIVACY_STATUS: &str = "private";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

pub struct YoutubePublisher {
    publisher: Publisher,
}

impl YoutubePublisher {
    pub fn new(client: Client) -> Self {
        Self {
            publisher: Publisher::new(PlatformId::Youtube, client, API_BASE_URL),
        }
    }

    /// Point the adapter at a different API host (tests).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.publisher.set_base_url(base_url);
        self
    }
}

#[async_trait]
impl PlatformPublisher for YoutubePublisher {
    fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    async fn try_upload(
        &self,
        upload: &UploadRequest<'_>,
        access_token: &str,
    ) -> Result<RemoteVideo, PublishError> {
        let bytes = self.publisher.read_media(upload.media_path).await?;

        let metadata = json!({
            "snippet": {
                "title": upload.title,
                "description": upload.description,
            },
            "status": {
                "privacyStatus": DEFAULT_PRIVACY_STATUS,
            },
        });

        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "media",
                Part::bytes(bytes)
                    .file_name(format!("{}.mp4", upload.title))
                    .mime_str("video/mp4")?,
            );

        let url = format!("{}/upload/youtube/v3/videos", self.publisher.base_url());
        let response = self
            .publisher
            .client
            .post(&url)
            .query(&[("uploadType", "multipart"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Provider(format!(
                "youtube upload returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response.json().await?;
        let url = format!("https://www.youtube.com/watch?v={}", uploaded.id);
        Ok(RemoteVideo {
            id: uploaded.id,
            url,
        })
    }
}
