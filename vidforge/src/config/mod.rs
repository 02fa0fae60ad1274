//! Environment-style configuration access.
//!
//! Platform credentials and server settings come from an environment-style
//! key/value source. The source sits behind a trait so tests can inject
//! fixture values without touching process environment.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::RwLock;

/// Key/value lookup for configuration values.
///
/// Missing and empty values are equivalent: both return `None`.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process-environment backed source, the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

/// In-memory source for tests and fixtures.
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.values.write().insert(key.into(), value.into());
        self
    }

    pub fn remove(&self, key: &str) -> &Self {
        self.values.write().remove(key);
        self
    }
}

impl ConfigSource for MemoryConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Directory holding generated media files.
    pub media_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8090,
            enable_cors: true,
            media_root: PathBuf::from("media"),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    ///
    /// Supported env vars:
    /// - `API_BIND_ADDRESS` (e.g. "0.0.0.0")
    /// - `API_PORT` (e.g. "8090")
    /// - `MEDIA_ROOT` (e.g. "/var/lib/vidforge/media")
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(bind_address) = std::env::var("API_BIND_ADDRESS")
            && !bind_address.trim().is_empty()
        {
            config.bind_address = bind_address;
        }

        if let Ok(port) = std::env::var("API_PORT")
            && let Ok(parsed) = port.parse::<u16>()
        {
            config.port = parsed;
        }

        if let Ok(media_root) = std::env::var("MEDIA_ROOT")
            && !media_root.trim().is_empty()
        {
            config.media_root = PathBuf::from(media_root);
        }

        config
    }
}
