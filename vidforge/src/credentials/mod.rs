//! Per-platform OAuth credential management.
//!
//! The [`CredentialStore`] is the single source of truth for which platforms
//! are configured (app-level client id + secret) and authorized (a user
//! access token on top of that). It is an explicitly constructed instance
//! owned by the service container, never ambient global state.

pub mod error;
pub mod store;
pub mod types;

pub use error::CredentialError;
pub use store::CredentialStore;
pub use types::PlatformCredentials;
