//! HTTP API.
//!
//! Thin axum layer over the services: routes deserialize and delegate, the
//! services own all publish and connection semantics.

pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{ApiServer, AppState};
