pub mod messenger;

use async_trait::async_trait;

use crate::models::OutboundMessage;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn first_name(&self, user_id: &str) -> anyhow::Result<String>;
}
