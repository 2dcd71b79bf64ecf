//! Invocation faults.
//!
//! These are the failures that are NOT turned into a response. Authorization
//! rejections live in [`crate::auth::AuthFailure`] and always map to 403.

use thiserror::Error;

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Strict mode received an event with no `headers` entry.
    #[error("event has no headers entry")]
    MissingHeaders,

    /// A gateway event passed authorization but carries no string `body`.
    #[error("event has no body")]
    MissingBody,

    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The queue rejected the message or could not be reached.
    #[error("failed to send message to {queue_url}: {message}")]
    Send { queue_url: String, message: String },
}
