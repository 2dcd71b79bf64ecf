//! Message types exchanged with the queue.

/// A message bound for the outbound queue.
///
/// Messages never carry attributes; only the destination and body are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Destination queue URL
    pub queue_url: String,
    /// Message body, forwarded verbatim
    pub body: String,
}

impl OutboundMessage {
    pub fn new(queue_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            body: body.into(),
        }
    }
}

/// What the queue reported back for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}
