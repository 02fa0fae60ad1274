//! Platform authorization URL construction.
//!
//! Pure functions of credential-store state: no side effects, no shared
//! mutable state between platforms. Each platform's URL shape is an isolated
//! case.

use platform_publishers::PlatformId;

use crate::credentials::PlatformCredentials;

const YOUTUBE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

const TIKTOK_AUTH_ENDPOINT: &str = "https://www.tiktok.com/v2/auth/authorize/";
const TIKTOK_SCOPE: &str = "video.upload";

const INSTAGRAM_AUTH_ENDPOINT: &str = "https://api.instagram.com/oauth/authorize";
const INSTAGRAM_SCOPE: &str = "user_profile,user_media";

/// Loopback-like origins get plain http; everything else must be https so
/// the redirect URI matches what the OAuth provider has registered.
fn is_loopback_origin(origin: &str) -> bool {
    let host = origin
        .strip_prefix('[')
        .map(|rest| rest.split(']').next().unwrap_or(rest))
        .unwrap_or_else(|| origin.split(':').next().unwrap_or(origin));

    matches!(host, "localhost" | "127.0.0.1" | "::1" | "0.0.0.0")
}

/// The callback URL the platform redirects back to.
///
/// Must match byte-for-byte between the authorization request and the token
/// exchange, so both go through this one function.
pub fn callback_url(platform: PlatformId, caller_origin: &str) -> String {
    let protocol = if is_loopback_origin(caller_origin) {
        "http"
    } else {
        "https"
    };
    format!("{protocol}://{caller_origin}/api/auth/{platform}/callback")
}

/// Build the platform's authorization URL.
///
/// The caller guarantees `credentials` belongs to a configured platform; the
/// "not configured -> no URL" decision lives in the service layer.
pub fn authorization_url(
    credentials: &PlatformCredentials,
    caller_origin: &str,
    state: &str,
) -> String {
    let redirect_uri = callback_url(credentials.platform, caller_origin);
    let redirect_uri = urlencoding::encode(&redirect_uri);
    let client_id = urlencoding::encode(&credentials.client_id);
    let state = urlencoding::encode(state);

    match credentials.platform {
        PlatformId::Youtube => {
            // Offline access plus a forced consent prompt guarantees Google
            // returns a refresh token, not just a short-lived access token.
            let scope = urlencoding::encode(YOUTUBE_SCOPE);
            format!(
                "{YOUTUBE_AUTH_ENDPOINT}?client_id={client_id}&redirect_uri={redirect_uri}\
                 &response_type=code&scope={scope}&access_type=offline&prompt=consent\
                 &state={state}"
            )
        }
        PlatformId::Tiktok => {
            let scope = urlencoding::encode(TIKTOK_SCOPE);
            format!(
                "{TIKTOK_AUTH_ENDPOINT}?client_key={client_id}&redirect_uri={redirect_uri}\
                 &response_type=code&scope={scope}&state={state}"
            )
        }
        PlatformId::Instagram => {
            let scope = urlencoding::encode(INSTAGRAM_SCOPE);
            format!(
                "{INSTAGRAM_AUTH_ENDPOINT}?client_id={client_id}&redirect_uri={redirect_uri}\
                 &response_type=code&scope={scope}&state={state}"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(platform: PlatformId) -> PlatformCredentials {
        PlatformCredentials::new(platform, "app-id", "app-secret")
    }

    #[test]
    fn youtube_url_requests_offline_access() {
        let url = authorization_url(
            &credentials(PlatformId::Youtube),
            "app.example.com",
            "nonce1",
        );

        assert!(url.starts_with(YOUTUBE_AUTH_ENDPOINT));
        assert!(url.contains("client_id=app-id"));
        assert!(url.contains(
            "redirect_uri=https%3A%2F%2Fapp.example.com%2Fapi%2Fauth%2Fyoutube%2Fcallback"
        ));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("state=nonce1"));
    }

    #[test]
    fn tiktok_uses_client_key_parameter() {
        let url = authorization_url(&credentials(PlatformId::Tiktok), "app.example.com", "n");

        assert!(url.contains("client_key=app-id"));
        assert!(!url.contains("client_id="));
        assert!(url.contains("scope=video.upload"));
    }

    #[test]
    fn instagram_scopes_are_comma_separated() {
        let url = authorization_url(&credentials(PlatformId::Instagram), "app.example.com", "n");

        assert!(url.contains("scope=user_profile%2Cuser_media"));
    }

    #[test]
    fn loopback_origins_get_plain_http() {
        assert_eq!(
            callback_url(PlatformId::Youtube, "localhost:3000"),
            "http://localhost:3000/api/auth/youtube/callback"
        );
        assert_eq!(
            callback_url(PlatformId::Tiktok, "127.0.0.1:8090"),
            "http://127.0.0.1:8090/api/auth/tiktok/callback"
        );
        assert_eq!(
            callback_url(PlatformId::Instagram, "app.example.com"),
            "https://app.example.com/api/auth/instagram/callback"
        );
        assert_eq!(
            callback_url(PlatformId::Youtube, "[::1]:8090"),
            "http://[::1]:8090/api/auth/youtube/callback"
        );
    }
}
