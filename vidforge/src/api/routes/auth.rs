//! Platform account connection routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::HOST},
    response::Html,
    routing::get,
};
use platform_publishers::{PlatformId, PlatformTarget};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{AuthUrlResponse, CallbackQuery};
use crate::api::server::AppState;
use crate::oauth::{CallbackOutcome, CallbackParams};

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{platform}/url", get(authorization_url))
        .route("/{platform}/callback", get(callback))
}

fn parse_platform(raw: &str) -> Result<PlatformId, ApiError> {
    match PlatformTarget::parse(raw) {
        PlatformTarget::Known(platform) => Ok(platform),
        PlatformTarget::Unsupported(raw) => Err(ApiError::bad_request(format!(
            "Platform '{raw}' is not supported"
        ))),
    }
}

/// The origin the platform should redirect back to, from the request itself.
fn caller_origin(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("Missing Host header"))
}

#[utoipa::path(
    get,
    path = "/api/auth/{platform}/url",
    tag = "auth",
    params(
        ("platform" = String, Path, description = "Platform identifier, e.g. youtube")
    ),
    responses(
        (status = 200, description = "Authorization URL", body = AuthUrlResponse),
        (status = 400, description = "Unsupported or unconfigured platform")
    )
)]
pub async fn authorization_url(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<AuthUrlResponse>> {
    let platform = parse_platform(&platform)?;
    let origin = caller_origin(&headers)?;

    let url = state
        .oauth_service
        .authorization_url(platform, &origin)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "NOT_CONFIGURED",
                format!(
                    "{} is not configured on this server",
                    platform.display_name()
                ),
            )
        })?;

    Ok(Json(AuthUrlResponse {
        platform: platform.to_string(),
        url,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/{platform}/callback",
    tag = "auth",
    params(
        ("platform" = String, Path, description = "Platform identifier"),
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("error" = Option<String>, Query, description = "Provider error code"),
        ("state" = Option<String>, Query, description = "Anti-forgery state")
    ),
    responses(
        (status = 200, description = "Account connected (HTML page)"),
        (status = 400, description = "Unsupported platform, denied, or invalid callback")
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let platform = parse_platform(&platform)?;
    let origin = caller_origin(&headers)?;

    let params = CallbackParams {
        code: query.code,
        error: query.error,
        state: query.state,
    };
    let outcome = state
        .oauth_service
        .handle_callback(platform, &origin, params)
        .await;

    Ok(render_outcome(outcome))
}

/// Terminal page shown in the popup/redirect window.
fn render_outcome(outcome: CallbackOutcome) -> (StatusCode, Html<String>) {
    let (status, title, body) = match outcome {
        CallbackOutcome::Completed { platform } => (
            StatusCode::OK,
            "Account connected",
            format!(
                "Your {} account is now connected. You can close this window.",
                platform.display_name()
            ),
        ),
        CallbackOutcome::Denied { platform, error } => (
            StatusCode::BAD_REQUEST,
            "Authorization denied",
            format!(
                "{} authorization was denied ({error}). You can close this window and try again.",
                platform.display_name()
            ),
        ),
        CallbackOutcome::Failed { message, .. } => {
            (StatusCode::BAD_REQUEST, "Connection failed", message)
        }
        CallbackOutcome::Invalid { platform } => (
            StatusCode::BAD_REQUEST,
            "Invalid callback",
            format!(
                "The {} callback carried no authorization code.",
                platform.display_name()
            ),
        ),
    };

    let page = format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1><p>{body}</p></body></html>"
    );
    (status, Html(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::api::routes;
    use crate::api::server::test_support::state_with_youtube;

    #[tokio::test]
    async fn unsupported_platform_url_is_400() {
        let (state, _container, _media_dir) = state_with_youtube();
        let app = routes::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/myspace/url")
                    .header(HOST, "localhost:8090")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unconfigured_platform_url_is_400_not_configured() {
        let (state, _container, _media_dir) = state_with_youtube();
        let app = routes::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/tiktok/url")
                    .header(HOST, "localhost:8090")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn configured_platform_url_carries_callback_redirect() {
        let (state, _container, _media_dir) = state_with_youtube();
        let app = routes::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/youtube/url")
                    .header(HOST, "localhost:8090")
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
        assert_eq!(body["platform"], "youtube");
        assert!(body["url"].as_str().unwrap().contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8090%2Fapi%2Fauth%2Fyoutube%2Fcallback"
        ));
    }

    #[test]
    fn completed_outcome_renders_ok() {
        let (status, Html(page)) = render_outcome(CallbackOutcome::Completed {
            platform: PlatformId::Youtube,
        });
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("YouTube account is now connected"));
    }

    #[test]
    fn denied_outcome_renders_bad_request() {
        let (status, Html(page)) = render_outcome(CallbackOutcome::Denied {
            platform: PlatformId::Tiktok,
            error: "access_denied".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(page.contains("access_denied"));
    }
}
