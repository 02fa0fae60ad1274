//! Callback handling and token lifecycle.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use platform_publishers::PlatformId;
use tracing::{info, warn};

use crate::credentials::{CredentialError, CredentialStore};

use super::authorize;
use super::exchange::TokenExchanger;
use super::state::StateManager;

/// Query parameters a platform sends to the callback endpoint.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

/// Result of processing one callback redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Code exchanged, tokens stored; the account is now connected.
    Completed { platform: PlatformId },
    /// The user (or the platform) denied the authorization.
    Denied { platform: PlatformId, error: String },
    /// The exchange was attempted and rejected, or the state/code was stale.
    Failed {
        platform: PlatformId,
        message: String,
    },
    /// The callback carried neither a code nor an error.
    Invalid { platform: PlatformId },
}

/// Drives the per-platform connection flow: authorization URL out, callback
/// with a single-use code back in, tokens into the credential store.
pub struct OauthService {
    store: Arc<CredentialStore>,
    exchanger: Arc<dyn TokenExchanger>,
    states: StateManager,
    /// Authorization codes already spent. A replayed code must never trigger
    /// a second exchange.
    used_codes: Mutex<HashSet<String>>,
}

impl OauthService {
    pub fn new(store: Arc<CredentialStore>, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self {
            store,
            exchanger,
            states: StateManager::new(),
            used_codes: Mutex::new(HashSet::new()),
        }
    }

    /// Authorization URL for a configured platform, or `None` when the
    /// platform has no app credentials. Issues a fresh state nonce per call.
    pub fn authorization_url(&self, platform: PlatformId, caller_origin: &str) -> Option<String> {
        let credentials = self.store.credentials(platform)?;
        let state = self.states.issue(platform);
        Some(authorize::authorization_url(
            &credentials,
            caller_origin,
            &state,
        ))
    }

    /// Process a platform redirect back to the callback endpoint.
    ///
    /// A provider error outcome performs no mutation at all. The state nonce
    /// and the authorization code are each valid exactly once.
    pub async fn handle_callback(
        &self,
        platform: PlatformId,
        caller_origin: &str,
        params: CallbackParams,
    ) -> CallbackOutcome {
        if let Some(error) = params.error {
            warn!(platform = %platform, %error, "authorization denied by provider");
            return CallbackOutcome::Denied { platform, error };
        }

        let Some(code) = params.code else {
            return CallbackOutcome::Invalid { platform };
        };

        let state_ok = params
            .state
            .as_deref()
            .is_some_and(|state| self.states.consume(platform, state));
        if !state_ok {
            warn!(platform = %platform, "callback state missing, expired, or replayed");
            return CallbackOutcome::Failed {
                platform,
                message: "Authorization request expired or was already used.".to_string(),
            };
        }

        if !self.used_codes.lock().insert(code.clone()) {
            warn!(platform = %platform, "authorization code replayed");
            return CallbackOutcome::Failed {
                platform,
                message: "Authorization code was already used.".to_string(),
            };
        }

        let Some(credentials) = self.store.credentials(platform) else {
            return CallbackOutcome::Failed {
                platform,
                message: format!("{} is not configured.", platform.display_name()),
            };
        };

        let redirect_uri = authorize::callback_url(platform, caller_origin);
        match self
            .exchanger
            .exchange_code(&credentials, &code, &redirect_uri)
            .await
        {
            Ok(tokens) => {
                self.store.set_access_token(platform, tokens.access_token);
                if let Some(refresh) = tokens.refresh_token {
                    self.store.set_refresh_token(platform, refresh);
                }
                info!(platform = %platform, "account connected");
                CallbackOutcome::Completed { platform }
            }
            Err(err) => {
                warn!(platform = %platform, error = %err, "token exchange failed");
                CallbackOutcome::Failed {
                    platform,
                    message: format!(
                        "Failed to connect {}: {err}",
                        platform.display_name()
                    ),
                }
            }
        }
    }

    /// Refresh the access token for an already connected platform.
    pub async fn refresh(&self, platform: PlatformId) -> Result<(), CredentialError> {
        let credentials = self
            .store
            .credentials(platform)
            .ok_or(CredentialError::NotConfigured(platform))?;

        let tokens = self.exchanger.refresh(&credentials).await?;
        self.store.set_access_token(platform, tokens.access_token);
        if let Some(refresh) = tokens.refresh_token {
            self.store.set_refresh_token(platform, refresh);
        }
        info!(platform = %platform, "access token refreshed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::config::MemoryConfigSource;
    use crate::credentials::PlatformCredentials;
    use crate::oauth::exchange::TokenResponse;

    use super::*;

    struct StubExchanger {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubExchanger {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl TokenExchanger for StubExchanger {
        async fn exchange_code(
            &self,
            _credentials: &PlatformCredentials,
            code: &str,
            _redirect_uri: &str,
        ) -> Result<TokenResponse, CredentialError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CredentialError::ExchangeRejected(
                    "invalid_grant: code expired".to_string(),
                ));
            }
            Ok(TokenResponse {
                access_token: format!("access-for-{code}"),
                refresh_token: Some("refresh-1".to_string()),
                expires_in: Some(3600),
            })
        }

        async fn refresh(
            &self,
            _credentials: &PlatformCredentials,
        ) -> Result<TokenResponse, CredentialError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TokenResponse {
                access_token: "refreshed-access".to_string(),
                refresh_token: None,
                expires_in: Some(3600),
            })
        }
    }

    fn store_with_youtube() -> Arc<CredentialStore> {
        let source = MemoryConfigSource::new();
        source.set("YOUTUBE_CLIENT_ID", "yt-app");
        source.set("YOUTUBE_CLIENT_SECRET", "yt-secret");
        Arc::new(CredentialStore::from_source(Arc::new(source)))
    }

    fn service(store: Arc<CredentialStore>, exchanger: StubExchanger) -> OauthService {
        OauthService::new(store, Arc::new(exchanger))
    }

    fn state_from_url(url: &str) -> String {
        url.split("state=").nth(1).unwrap().to_string()
    }

    #[tokio::test]
    async fn successful_callback_connects_the_account() {
        let store = store_with_youtube();
        let svc = service(store.clone(), StubExchanger::succeeding());

        let url = svc
            .authorization_url(PlatformId::Youtube, "localhost:8090")
            .unwrap();
        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                CallbackParams {
                    code: Some("code-1".to_string()),
                    error: None,
                    state: Some(state_from_url(&url)),
                },
            )
            .await;

        assert_eq!(
            outcome,
            CallbackOutcome::Completed {
                platform: PlatformId::Youtube
            }
        );
        assert!(store.is_authorized(PlatformId::Youtube));
        assert_eq!(
            store.access_token(PlatformId::Youtube),
            Some("access-for-code-1".to_string())
        );
    }

    #[tokio::test]
    async fn unconfigured_platform_gets_no_authorization_url() {
        let svc = service(store_with_youtube(), StubExchanger::succeeding());
        assert!(svc
            .authorization_url(PlatformId::Tiktok, "localhost:8090")
            .is_none());
    }

    #[tokio::test]
    async fn denied_callback_mutates_nothing() {
        let store = store_with_youtube();
        let svc = service(store.clone(), StubExchanger::succeeding());
        svc.authorization_url(PlatformId::Youtube, "localhost:8090");

        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                CallbackParams {
                    code: None,
                    error: Some("access_denied".to_string()),
                    state: None,
                },
            )
            .await;

        assert_eq!(
            outcome,
            CallbackOutcome::Denied {
                platform: PlatformId::Youtube,
                error: "access_denied".to_string()
            }
        );
        assert!(!store.is_authorized(PlatformId::Youtube));
    }

    #[tokio::test]
    async fn callback_without_code_or_error_is_invalid() {
        let svc = service(store_with_youtube(), StubExchanger::succeeding());

        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                CallbackParams::default(),
            )
            .await;

        assert_eq!(
            outcome,
            CallbackOutcome::Invalid {
                platform: PlatformId::Youtube
            }
        );
    }

    #[tokio::test]
    async fn callback_with_unknown_state_fails_without_exchange() {
        let exchanger = Arc::new(StubExchanger::succeeding());
        let svc = OauthService::new(store_with_youtube(), exchanger.clone());

        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                CallbackParams {
                    code: Some("code-1".to_string()),
                    error: None,
                    state: Some("forged".to_string()),
                },
            )
            .await;

        assert!(matches!(outcome, CallbackOutcome::Failed { .. }));
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn replayed_code_fails_without_second_exchange() {
        let exchanger = Arc::new(StubExchanger::succeeding());
        let store = store_with_youtube();
        let svc = OauthService::new(store, exchanger.clone());

        let first = svc
            .authorization_url(PlatformId::Youtube, "localhost:8090")
            .unwrap();
        let second = svc
            .authorization_url(PlatformId::Youtube, "localhost:8090")
            .unwrap();

        let params = |state: String| CallbackParams {
            code: Some("code-1".to_string()),
            error: None,
            state: Some(state),
        };

        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                params(state_from_url(&first)),
            )
            .await;
        assert!(matches!(outcome, CallbackOutcome::Completed { .. }));

        // Fresh state, same code: the code guard rejects the replay.
        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                params(state_from_url(&second)),
            )
            .await;
        assert!(matches!(outcome, CallbackOutcome::Failed { .. }));
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_exchange_reports_failed() {
        let store = store_with_youtube();
        let svc = service(store.clone(), StubExchanger::failing());

        let url = svc
            .authorization_url(PlatformId::Youtube, "localhost:8090")
            .unwrap();
        let outcome = svc
            .handle_callback(
                PlatformId::Youtube,
                "localhost:8090",
                CallbackParams {
                    code: Some("code-1".to_string()),
                    error: None,
                    state: Some(state_from_url(&url)),
                },
            )
            .await;

        assert!(matches!(outcome, CallbackOutcome::Failed { .. }));
        assert!(!store.is_authorized(PlatformId::Youtube));
    }

    #[tokio::test]
    async fn refresh_updates_the_stored_access_token() {
        let store = store_with_youtube();
        store.set_access_token(PlatformId::Youtube, "stale");
        store.set_refresh_token(PlatformId::Youtube, "refresh-1");
        let svc = service(store.clone(), StubExchanger::succeeding());

        svc.refresh(PlatformId::Youtube).await.unwrap();
        assert_eq!(
            store.access_token(PlatformId::Youtube),
            Some("refreshed-access".to_string())
        );
    }

    #[tokio::test]
    async fn refresh_of_unconfigured_platform_errors() {
        let svc = service(store_with_youtube(), StubExchanger::succeeding());
        let err = svc.refresh(PlatformId::Tiktok).await.unwrap_err();
        assert!(matches!(err, CredentialError::NotConfigured(_)));
    }
}
