pub mod error;
pub mod platform;
pub mod platforms;
pub mod publisher;
pub mod registry;
pub mod result;
mod default;

pub use default::{DEFAULT_UPLOAD_TIMEOUT, default_client, default_registry};
pub use error::PublishError;
pub use platform::{PlatformId, PlatformTarget};
pub use publisher::{PlatformPublisher, Publisher, UploadRequest};
pub use registry::PublisherRegistry;
pub use result::{FailureReason, PLATFORM_ALL, PublishResult, RemoteVideo};
