//! vidforge library crate.
//!
//! Connects social platform accounts over OAuth and publishes videos to any
//! subset of them in one request, reporting one result per platform.

pub mod activity;
pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod media;
pub mod oauth;
pub mod publish;
pub mod services;
pub mod videos;

pub use error::{Error, Result};
