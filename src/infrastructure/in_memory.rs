use crate::domain::ports::MessageTransport;
use crate::error::{MailerError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// A thread-safe in-memory message transport.
///
/// Records every body it accepts instead of delivering it. Clones share the
/// same record, so a caller can keep a handle while the pipeline owns a boxed
/// copy. Useful for tests and for embedding the pipeline without a mail
/// account.
#[derive(Default, Clone)]
pub struct InMemoryTransport {
    sent: Arc<RwLock<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryTransport {
    /// Creates a new transport that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new transport that rejects every message.
    pub fn failing() -> Self {
        let transport = Self::new();
        transport.set_failing(true);
        transport
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Bodies accepted so far, in the order they were sent.
    pub async fn sent(&self) -> Vec<String> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl MessageTransport for InMemoryTransport {
    async fn send(&self, body: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailerError::Transport(
                "in-memory transport is set to fail".to_string(),
            ));
        }
        debug!(bytes = body.len(), "message recorded");
        self.sent.write().await.push(body.to_string());
        Ok(())
    }
}
