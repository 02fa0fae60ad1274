//! OpenAPI documentation configuration.
//!
//! Aggregates the documented endpoints and schemas using `utoipa`.

use utoipa::OpenApi;

use crate::api::models::{
    AuthUrlResponse, HealthResponse, PlatformListResponse, PlatformStatus, PublishRequestBody,
    PublishResponse,
};
use platform_publishers::{FailureReason, PublishResult};

/// OpenAPI documentation for the vidforge API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "vidforge API",
        version = "0.1.0",
        description = "REST API for the vidforge publishing service. Connects social platform accounts over OAuth and publishes videos to them in one request.",
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8090", description = "Local development server")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "platforms", description = "Platform discovery and connection status"),
        (name = "auth", description = "Platform account connection endpoints"),
        (name = "videos", description = "Video publishing endpoints")
    ),
    paths(
        crate::api::routes::health::health_check,
        crate::api::routes::platforms::list_platforms,
        crate::api::routes::auth::authorization_url,
        crate::api::routes::auth::callback,
        crate::api::routes::videos::publish_video,
    ),
    components(schemas(
        HealthResponse,
        PlatformListResponse,
        PlatformStatus,
        AuthUrlResponse,
        PublishRequestBody,
        PublishResponse,
        PublishResult,
        FailureReason,
    ))
)]
pub struct ApiDoc;
