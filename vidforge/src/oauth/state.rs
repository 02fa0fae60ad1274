//! Single-use anti-forgery state for the OAuth flow.
//!
//! Every authorization URL carries a random `state` nonce. The platform
//! echoes it back on the callback, where it is consumed exactly once; an
//! unknown, expired, or replayed state fails the callback.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use platform_publishers::PlatformId;
use rand::Rng;

/// How long an issued state stays valid.
const STATE_TTL: Duration = Duration::from_secs(10 * 60);

struct PendingState {
    platform: PlatformId,
    issued_at: Instant,
}

/// Issues and consumes single-use state nonces.
pub struct StateManager {
    ttl: Duration,
    pending: Mutex<HashMap<String, PendingState>>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self::with_ttl(STATE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh nonce bound to a platform.
    pub fn issue(&self, platform: PlatformId) -> String {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        let nonce: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

        let mut pending = self.pending.lock();
        let now = Instant::now();
        pending.retain(|_, state| now.duration_since(state.issued_at) < self.ttl);
        pending.insert(
            nonce.clone(),
            PendingState {
                platform,
                issued_at: now,
            },
        );
        nonce
    }

    /// Consume a nonce: valid exactly once, for the platform it was issued
    /// for, within the TTL.
    pub fn consume(&self, platform: PlatformId, state: &str) -> bool {
        let Some(pending) = self.pending.lock().remove(state) else {
            return false;
        };
        pending.platform == platform && pending.issued_at.elapsed() < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_state_is_32_hex_chars() {
        let manager = StateManager::new();
        let state = manager.issue(PlatformId::Youtube);

        assert_eq!(state.len(), 32);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn state_is_single_use() {
        let manager = StateManager::new();
        let state = manager.issue(PlatformId::Youtube);

        assert!(manager.consume(PlatformId::Youtube, &state));
        assert!(!manager.consume(PlatformId::Youtube, &state));
    }

    #[test]
    fn state_is_platform_bound() {
        let manager = StateManager::new();
        let state = manager.issue(PlatformId::Tiktok);

        assert!(!manager.consume(PlatformId::Youtube, &state));
        // Consumed by the failed attempt: replay on the right platform fails too.
        assert!(!manager.consume(PlatformId::Tiktok, &state));
    }

    #[test]
    fn expired_state_is_rejected() {
        let manager = StateManager::with_ttl(Duration::ZERO);
        let state = manager.issue(PlatformId::Instagram);

        assert!(!manager.consume(PlatformId::Instagram, &state));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let manager = StateManager::new();
        assert!(!manager.consume(PlatformId::Youtube, "deadbeef"));
    }
}
