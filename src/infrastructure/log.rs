use crate::domain::ports::MessageTransport;
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Writes each message to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

#[async_trait]
impl MessageTransport for LogTransport {
    async fn send(&self, body: &str) -> Result<()> {
        info!(body = %body, "dry run: message not delivered");
        Ok(())
    }
}
