//! Activity recording for audit trails.
//!
//! Recording is fire-and-forget: a publish outcome must never be lost because
//! the audit sink hiccuped, so the trait returns nothing.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// Sink for user-visible activity events.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(&self, owner_id: Uuid, action: &str, details: Value);
}

/// Default sink: emits activity as structured log events.
#[derive(Default)]
pub struct TracingActivityLog;

#[async_trait]
impl ActivityLog for TracingActivityLog {
    async fn record(&self, owner_id: Uuid, action: &str, details: Value) {
        info!(%owner_id, action, %details, "activity");
    }
}
