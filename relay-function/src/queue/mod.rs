//! Queue module for outbound message delivery.
//!
//! This module provides:
//! - The [`MessageQueue`] seam the handler sends through
//! - [`SqsQueue`], backed by Amazon SQS
//! - [`MemoryQueue`], which keeps messages in memory
//!
//! ## Flow
//!
//! ```text
//! Event → Relay handler → OutboundMessage → MessageQueue::send → queue
//! ```

pub mod memory;
pub mod sqs;
pub mod types;

use async_trait::async_trait;

use crate::error::RelayError;

pub use memory::MemoryQueue;
pub use sqs::SqsQueue;
pub use types::{OutboundMessage, SendReceipt};

/// A destination that accepts one message per call.
///
/// Implementations perform a single send attempt; failures are returned, never retried.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, RelayError>;
}
