//! Multi-platform publish orchestration.

mod service;

pub use service::PublishService;
