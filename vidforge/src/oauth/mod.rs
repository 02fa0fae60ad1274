//! OAuth connection lifecycle.
//!
//! [`authorize`] builds the platform authorization URL (the synchronous half
//! of the flow), [`OauthService`] completes it when the platform redirects
//! back with a code, and [`exchange`] performs the actual token POST behind a
//! trait so tests never touch the network.

pub mod authorize;
pub mod exchange;
pub mod service;
pub mod state;

pub use exchange::{HttpTokenExchanger, TokenExchanger, TokenResponse};
pub use service::{CallbackOutcome, CallbackParams, OauthService};
pub use state::StateManager;
