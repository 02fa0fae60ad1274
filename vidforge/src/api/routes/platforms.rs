//! Platform discovery routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::models::{PlatformListResponse, PlatformStatus};
use crate::api::server::AppState;

/// Create the platforms router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_platforms))
}

#[utoipa::path(
    get,
    path = "/api/platforms",
    tag = "platforms",
    responses(
        (status = 200, description = "Configured platforms and their connection status", body = PlatformListResponse)
    )
)]
pub async fn list_platforms(State(state): State<AppState>) -> Json<PlatformListResponse> {
    let platforms = state
        .credential_store
        .list_configured()
        .into_iter()
        .map(|platform| PlatformStatus {
            platform: platform.to_string(),
            display_name: platform.display_name().to_string(),
            configured: true,
            authorized: state.credential_store.is_authorized(platform),
        })
        .collect();

    Json(PlatformListResponse { platforms })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::routes;
    use crate::api::server::test_support::state_with_youtube;

    #[tokio::test]
    async fn listing_only_returns_configured_platforms() {
        let (state, _container, _media_dir) = state_with_youtube();
        let app = routes::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/platforms")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let platforms = body["platforms"].as_array().unwrap();

        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0]["platform"], "youtube");
        assert_eq!(platforms[0]["configured"], true);
        assert_eq!(platforms[0]["authorized"], false);
    }
}
