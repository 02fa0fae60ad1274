//! Video publishing routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{PublishRequestBody, PublishResponse};
use crate::api::server::AppState;

/// Create the videos router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/publish", post(publish_video))
}

#[utoipa::path(
    post,
    path = "/api/videos/{id}/publish",
    tag = "videos",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    request_body = PublishRequestBody,
    responses(
        (status = 200, description = "One result per requested platform, even when all failed", body = PublishResponse),
        (status = 400, description = "Empty platform list"),
        (status = 404, description = "Unknown video")
    )
)]
pub async fn publish_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PublishRequestBody>,
) -> ApiResult<Json<PublishResponse>> {
    let results = state
        .publish_service
        .publish(id, &body.platforms, &state.cancel_token)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(PublishResponse { results }))
}
