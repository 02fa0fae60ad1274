//! Credential error types.

use platform_publishers::PlatformId;
use thiserror::Error;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Platform lacks app-level client credentials.
    #[error("Platform {0} is not configured")]
    NotConfigured(PlatformId),

    /// Refresh requested but no refresh token is stored.
    #[error("No refresh token stored for {0} - re-authorization required")]
    MissingRefreshToken(PlatformId),

    /// Network error talking to the token endpoint.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Token endpoint answered with an error payload.
    #[error("Token endpoint rejected the request: {0}")]
    ExchangeRejected(String),

    /// Malformed token endpoint response.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CredentialError {
    /// Check if this error is transient and may be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
