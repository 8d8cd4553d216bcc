use crate::error::Result;
use async_trait::async_trait;

/// Delivers a composed message body to its destination.
///
/// Implementations arrive fully configured (sender, recipient, subject,
/// credentials) and must be safe to share across concurrent requests.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, body: &str) -> Result<()>;
}

pub type MessageTransportBox = Box<dyn MessageTransport>;
