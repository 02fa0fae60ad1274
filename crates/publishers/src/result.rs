//! Value-typed publish outcomes.
//!
//! A per-platform failure is data, not an error: the orchestrator aggregates
//! one [`PublishResult`] per requested platform and the whole batch succeeds
//! as a request even when every entry failed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Platform marker for request-level precondition failures that apply to
/// every requested platform at once (missing or unresolvable media).
pub const PLATFORM_ALL: &str = "all";

/// Structured failure kind carried by a non-succeeding [`PublishResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// No user access token is present for the platform.
    NotAuthorized,
    /// The video has no media location at all.
    NoMedia,
    /// The media location did not resolve to a readable file.
    MediaNotFound,
    /// The caller named a platform outside the supported set.
    UnsupportedPlatform,
    /// Transport or provider-side failure during the upload call.
    ProviderError,
    /// The publish request was cancelled before this platform finished.
    Cancelled,
}

/// Provider-side identity of a successfully published video.
#[derive(Debug, Clone)]
pub struct RemoteVideo {
    /// Provider-assigned video id.
    pub id: String,
    /// Public URL of the published video.
    pub url: String,
}

/// Outcome of one platform's publish attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishResult {
    /// Platform id the result belongs to, or [`PLATFORM_ALL`].
    pub platform: String,
    pub succeeded: bool,
    /// Present iff `succeeded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    /// Human-readable status line.
    pub message: String,
    /// Present iff not `succeeded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
}

impl PublishResult {
    pub fn success(
        platform: impl Into<String>,
        remote_url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            succeeded: true,
            remote_url: Some(remote_url.into()),
            message: message.into(),
            failure_reason: None,
        }
    }

    pub fn failure(
        platform: impl Into<String>,
        reason: FailureReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            succeeded: false,
            remote_url: None,
            message: message.into(),
            failure_reason: Some(reason),
        }
    }
}
