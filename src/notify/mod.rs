pub mod feishu;

use std::sync::Arc;

use anyhow::Result;

pub use feishu::FeishuDelivery;

/// The chat-platform collaborator that actually transmits a formatted
/// message. Send failures after the webhook's 202 are logged, not retried.
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}

/// Log-only delivery used when Feishu credentials are not configured.
pub struct NoopDelivery;

#[async_trait::async_trait]
impl Delivery for NoopDelivery {
    async fn send(&self, message: &str) -> Result<()> {
        tracing::info!(chars = message.chars().count(), "delivery disabled; message dropped");
        Ok(())
    }
}

/// Pick the delivery backend from the environment: Feishu when app
/// credentials and a chat id are present, otherwise a logging no-op.
pub fn from_env() -> Arc<dyn Delivery> {
    match FeishuDelivery::from_env() {
        Some(d) => Arc::new(d),
        None => {
            tracing::warn!(
                "FEISHU_APP_ID/FEISHU_APP_SECRET/FEISHU_CHAT_ID not set; using no-op delivery"
            );
            Arc::new(NoopDelivery)
        }
    }
}
