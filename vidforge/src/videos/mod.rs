//! Video asset catalog.
//!
//! Publishing operates on videos by id. The store trait keeps the orchestrator
//! independent of where assets actually live; the in-memory implementation
//! backs tests and the default service wiring.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Lifecycle status of a video asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Draft,
    Published,
}

/// A video asset owned by a user, possibly with uploaded media attached.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoAsset {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location of the media file, if any has been uploaded. A URL or a
    /// bare filename relative to the media root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_location: Option<String>,
    pub owner_id: Uuid,
    pub status: VideoStatus,
    pub created_at: DateTime<Utc>,
}

impl VideoAsset {
    pub fn new(title: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            media_location: None,
            owner_id,
            status: VideoStatus::Draft,
            created_at: Utc::now(),
        }
    }

    pub fn with_media(mut self, location: impl Into<String>) -> Self {
        self.media_location = Some(location.into());
        self
    }
}

/// Lookup and status updates for video assets.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<VideoAsset>;

    async fn update_status(&self, id: Uuid, status: VideoStatus) -> Result<()>;
}

/// Process-local store keyed by video id.
#[derive(Default)]
pub struct InMemoryVideoStore {
    videos: DashMap<Uuid, VideoAsset>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, video: VideoAsset) {
        self.videos.insert(video.id, video);
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn get_video(&self, id: Uuid) -> Result<VideoAsset> {
        self.videos
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found("video", id.to_string()))
    }

    async fn update_status(&self, id: Uuid, status: VideoStatus) -> Result<()> {
        let mut entry = self
            .videos
            .get_mut(&id)
            .ok_or_else(|| Error::not_found("video", id.to_string()))?;
        entry.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_video_is_not_found() {
        let store = InMemoryVideoStore::new();
        let err = store.get_video(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_status_persists() {
        let store = InMemoryVideoStore::new();
        let video = VideoAsset::new("clip", Uuid::new_v4());
        let id = video.id;
        store.insert(video);

        store.update_status(id, VideoStatus::Published).await.unwrap();
        let loaded = store.get_video(id).await.unwrap();
        assert_eq!(loaded.status, VideoStatus::Published);
    }
}
