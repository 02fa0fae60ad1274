//! Fan-out publish orchestrator.
//!
//! One request targets N platforms and yields exactly N results in request
//! order. Platform attempts are independent: one adapter's failure never
//! aborts or reorders the rest of the batch.

use std::sync::Arc;

use futures::future::join_all;
use platform_publishers::{
    FailureReason, PlatformTarget, PublishResult, PublisherRegistry, UploadRequest, PLATFORM_ALL,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::activity::ActivityLog;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::media::{MediaError, MediaResolver};
use crate::videos::{VideoAsset, VideoStatus, VideoStore};

pub struct PublishService {
    credentials: Arc<CredentialStore>,
    publishers: Arc<PublisherRegistry>,
    videos: Arc<dyn VideoStore>,
    activity: Arc<dyn ActivityLog>,
    media: MediaResolver,
}

impl PublishService {
    pub fn new(
        credentials: Arc<CredentialStore>,
        publishers: Arc<PublisherRegistry>,
        videos: Arc<dyn VideoStore>,
        activity: Arc<dyn ActivityLog>,
        media: MediaResolver,
    ) -> Self {
        Self {
            credentials,
            publishers,
            videos,
            activity,
            media,
        }
    }

    /// Publish a video to each requested platform.
    ///
    /// Returns one result per requested platform in request order. Errors are
    /// reserved for request-level problems (empty target list, unknown video);
    /// everything that goes wrong per platform, or with the media itself, is
    /// reported inside the result list.
    #[instrument(skip(self, cancel), fields(video_id = %video_id))]
    pub async fn publish(
        &self,
        video_id: Uuid,
        targets: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<PublishResult>> {
        if targets.is_empty() {
            return Err(Error::validation("no platforms requested"));
        }

        let video = self.videos.get_video(video_id).await?;

        let media_path = match self.media.resolve(video.media_location.as_deref()).await {
            Ok(path) => path,
            Err(MediaError::Missing) => {
                return Ok(vec![PublishResult::failure(
                    PLATFORM_ALL,
                    FailureReason::NoMedia,
                    "Video has no media to publish. Please upload a video file first.",
                )]);
            }
            Err(err) => {
                warn!(error = %err, "media resolution failed");
                return Ok(vec![PublishResult::failure(
                    PLATFORM_ALL,
                    FailureReason::MediaNotFound,
                    "Video media file could not be found. Please re-upload the video.",
                )]);
            }
        };

        let upload = UploadRequest {
            title: &video.title,
            description: video.description.as_deref().unwrap_or(""),
            media_path: &media_path,
        };

        let attempts = targets
            .iter()
            .map(|raw| self.attempt(PlatformTarget::parse(raw), &upload, cancel));
        let results = join_all(attempts).await;

        self.finish(&video, targets, &results).await;
        Ok(results)
    }

    /// One platform's attempt; never fails the batch.
    async fn attempt(
        &self,
        target: PlatformTarget,
        upload: &UploadRequest<'_>,
        cancel: &CancellationToken,
    ) -> PublishResult {
        let platform = match &target {
            PlatformTarget::Known(platform) => *platform,
            PlatformTarget::Unsupported(raw) => {
                return PublishResult::failure(
                    raw.clone(),
                    FailureReason::UnsupportedPlatform,
                    format!("Publishing to {raw} is not supported."),
                );
            }
        };

        let Some(adapter) = self.publishers.get(platform) else {
            return PublishResult::failure(
                platform.to_string(),
                FailureReason::UnsupportedPlatform,
                format!("Publishing to {} is not supported.", platform.display_name()),
            );
        };

        if cancel.is_cancelled() {
            return Self::cancelled(&target);
        }

        let token = self.credentials.access_token(platform);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Self::cancelled(&target),
            result = adapter.publish(upload, token.as_deref()) => result,
        }
    }

    fn cancelled(target: &PlatformTarget) -> PublishResult {
        PublishResult::failure(
            target.id_string(),
            FailureReason::Cancelled,
            "Publish was cancelled before this platform finished.",
        )
    }

    /// Post-batch bookkeeping: mark the video published when anything landed,
    /// and record the batch outcome.
    async fn finish(&self, video: &VideoAsset, targets: &[String], results: &[PublishResult]) {
        let succeeded: Vec<&str> = results
            .iter()
            .filter(|r| r.succeeded)
            .map(|r| r.platform.as_str())
            .collect();

        if !succeeded.is_empty()
            && let Err(err) = self
                .videos
                .update_status(video.id, VideoStatus::Published)
                .await
        {
            warn!(error = %err, "failed to mark video published");
        }

        info!(
            requested = targets.len(),
            succeeded = succeeded.len(),
            "publish batch finished"
        );
        self.activity
            .record(
                video.owner_id,
                "video.publish",
                json!({
                    "video_id": video.id,
                    "requested": targets,
                    "succeeded": succeeded,
                }),
            )
            .await;
    }
}
