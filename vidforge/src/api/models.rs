//! API request/response models.

use platform_publishers::PublishResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-platform connection status.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlatformStatus {
    /// Platform identifier, e.g. "youtube"
    pub platform: String,
    /// Branded display name, e.g. "YouTube"
    pub display_name: String,
    /// App-level client credentials are present
    pub configured: bool,
    /// A user account is connected
    pub authorized: bool,
}

/// Listing of all supported platforms.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlatformListResponse {
    pub platforms: Vec<PlatformStatus>,
}

/// Authorization URL for connecting a platform account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthUrlResponse {
    pub platform: String,
    pub url: String,
}

/// Query parameters the platform appends to the callback redirect.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// Publish a video to one or more platforms.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PublishRequestBody {
    /// Requested platform identifiers, e.g. ["youtube", "tiktok"]
    pub platforms: Vec<String>,
}

/// One result per requested platform, in request order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublishResponse {
    pub results: Vec<PublishResult>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}
