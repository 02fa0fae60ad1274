//! Instagram Graph API upload adapter.
//!
//! Two-step protocol: create a media container for the video, then publish
//! the container. Both calls carry the user's access token.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::PublishError;
use crate::platform::PlatformId;
use crate::publisher::{PlatformPublisher, Publisher, UploadRequest};
use crate::result::RemoteVideo;

const API_BASE_URL: &str = "https://graph.instagram.com";

#[derive(Debug, Deserialize)]
struct MediaResponse {
    id: String,
}

pub struct InstagramPublisher {
    publisher: Publisher,
}

impl InstagramPublisher {
    pub fn new(client: Client) -> Self {
        Self {
            publisher: Publisher::new(PlatformId::Instagram, client, API_BASE_URL),
        }
    }

    /// Point the adapter at a different API host (tests).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.publisher.set_base_url(base_url);
        self
    }

    async fn create_container(
        &self,
        upload: &UploadRequest<'_>,
        access_token: &str,
    ) -> Result<String, PublishError> {
        let bytes = self.publisher.read_media(upload.media_path).await?;

        let form = Form::new()
            .text("media_type", "VIDEO")
            .text("caption", upload.title.to_string())
            .part(
                "video_file",
                Part::bytes(bytes)
                    .file_name(format!("{}.mp4", upload.title))
                    .mime_str("video/mp4")?,
            );

        let url = format!("{}/me/media", self.publisher.base_url());
        let response = self
            .publisher
            .client
            .post(&url)
            .bearer_auth(access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Provider(format!(
                "instagram container create returned {status}: {body}"
            )));
        }

        let container: MediaResponse = response.json().await?;
        Ok(container.id)
    }

    async fn publish_container(
        &self,
        creation_id: &str,
        access_token: &str,
    ) -> Result<String, PublishError> {
        let url = format!("{}/me/media_publish", self.publisher.base_url());
        let response = self
            .publisher
            .client
            .post(&url)
            .bearer_auth(access_token)
            .form(&[("creation_id", creation_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Provider(format!(
                "instagram publish returned {status}: {body}"
            )));
        }

        let media: MediaResponse = response.json().await?;
        Ok(media.id)
    }
}

#[async_trait]
impl PlatformPublisher for InstagramPublisher {
    fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    async fn try_upload(
        &self,
        upload: &UploadRequest<'_>,
        access_token: &str,
    ) -> Result<RemoteVideo, PublishError> {
        let creation_id = self.create_container(upload, access_token).await?;
        let media_id = self.publish_container(&creation_id, access_token).await?;

        let url = format!("https://www.instagram.com/reel/{media_id}/");
        Ok(RemoteVideo { id: media_id, url })
    }
}
