use thiserror::Error;

/// Internal adapter error.
///
/// These never cross the orchestrator boundary; the provided
/// [`crate::PlatformPublisher::publish`] wrapper converts every variant into
/// a non-succeeding [`crate::PublishResult`].
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider rejected upload: {0}")]
    Provider(String),
    #[error("upload timed out")]
    Timeout,
    #[error("invalid media: {0}")]
    InvalidMedia(String),
}
