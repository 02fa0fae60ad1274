use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidforge::api::{ApiServer, AppState};
use vidforge::config::AppConfig;
use vidforge::services::ServiceContainer;

const DEFAULT_LOG_FILTER: &str = "vidforge=info,platform_publishers=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env_or_default();
    let container = Arc::new(ServiceContainer::new(&config));

    let state = AppState::new(
        container.credential_store.clone(),
        container.oauth_service.clone(),
        container.publish_service.clone(),
        container.cancellation_token(),
    );
    let server = ApiServer::new(config, state);

    let shutdown = container.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    server.run().await?;

    tracing::info!("vidforge stopped");
    Ok(())
}
