//! In-memory [`MessageQueue`] for tests and dry runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{MessageQueue, OutboundMessage, SendReceipt};
use crate::error::RelayError;

/// Records every message it is given. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryQueue {
    inner: Arc<MemoryQueueInner>,
}

#[derive(Default)]
struct MemoryQueueInner {
    sent: Mutex<Vec<OutboundMessage>>,
    fail_with: Option<String>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose every send fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MemoryQueueInner {
                sent: Mutex::new(Vec::new()),
                fail_with: Some(message.into()),
            }),
        }
    }

    /// Snapshot of the messages accepted so far.
    pub async fn sent(&self) -> Vec<OutboundMessage> {
        self.inner.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessageQueue for MemoryQueue {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, RelayError> {
        if let Some(reason) = &self.inner.fail_with {
            return Err(RelayError::Send {
                queue_url: message.queue_url.clone(),
                message: reason.clone(),
            });
        }

        let mut sent = self.inner.sent.lock().await;
        sent.push(message.clone());
        let message_id = format!("memory-{}", sent.len());

        info!(
            queue_url = %message.queue_url,
            message_id = %message_id,
            body_length = message.body.len(),
            "memory_message_sent"
        );

        Ok(SendReceipt {
            message_id: Some(message_id),
        })
    }
}
