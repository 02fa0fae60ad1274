//! API server setup and configuration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::api::routes;
use crate::config::AppConfig;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::oauth::OauthService;
use crate::publish::PublishService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server start time for uptime calculation
    pub start_time: Instant,
    pub credential_store: Arc<CredentialStore>,
    pub oauth_service: Arc<OauthService>,
    pub publish_service: Arc<PublishService>,
    /// Shared shutdown token; in-flight publishes observe it.
    pub cancel_token: CancellationToken,
}

impl AppState {
    pub fn new(
        credential_store: Arc<CredentialStore>,
        oauth_service: Arc<OauthService>,
        publish_service: Arc<PublishService>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            credential_store,
            oauth_service,
            publish_service,
            cancel_token,
        }
    }
}

/// API server.
pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router with all middleware and routes.
    fn build_router(&self) -> Router {
        let mut router = routes::create_router(self.state.clone());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        // Trace every request except health probes.
        router.layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                if req.uri().path().starts_with("/health") {
                    Span::none()
                } else {
                    let mut make_span =
                        tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO);
                    use tower_http::trace::MakeSpan;
                    make_span.make_span(req)
                }
            }),
        )
    }

    /// Start the server; returns when the cancel token fires.
    pub async fn run(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.bind_address, self.config.port)
            .parse()
            .map_err(|e| Error::config(format!("Invalid bind address: {e}")))?;

        let router = self.build_router();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("API server listening on http://{addr}");

        let cancel_token = self.state.cancel_token.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                cancel_token.cancelled().await;
                tracing::info!("API server shutting down...");
            })
            .await
            .map_err(|e| Error::Other(format!("Server error: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::MemoryConfigSource;
    use crate::services::ServiceContainer;

    /// Fully wired state with only YouTube configured and a temp media root.
    pub(crate) fn state_with_youtube() -> (AppState, Arc<ServiceContainer>, tempfile::TempDir) {
        let source = MemoryConfigSource::new();
        source.set("YOUTUBE_CLIENT_ID", "yt-app");
        source.set("YOUTUBE_CLIENT_SECRET", "yt-secret");

        let media_dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            media_root: media_dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let container = Arc::new(ServiceContainer::with_source(&config, Arc::new(source)));

        let state = AppState::new(
            container.credential_store.clone(),
            container.oauth_service.clone(),
            container.publish_service.clone(),
            container.cancellation_token(),
        );
        (state, container, media_dir)
    }
}
