//! API route modules.
//!
//! Organizes routes by resource type.

pub mod auth;
pub mod health;
pub mod platforms;
pub mod videos;

use axum::Router;

use crate::api::server::AppState;

/// Create the main API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/platforms", platforms::router())
        .nest("/api/auth", auth::router())
        .nest("/api/videos", videos::router())
        .nest("/health", health::router())
        .with_state(state)
}
