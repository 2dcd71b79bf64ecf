//! Gateboard relay - authorizes inbound events and forwards them to SQS.
//!
//! This library backs two binaries:
//! - `relay-lambda`: the Lambda function, invoked directly or through a function URL
//! - `relay-web`: a local HTTP front end that emulates a function URL
//!
//! ## Flow
//!
//! ```text
//! Direct invoke ──────────────────────────┐
//!                                          ├→ Relay → SQS queue
//! Function URL → bearer token check ──────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod queue;
pub mod web;

// Re-export commonly used types
pub use auth::AuthFailure;
pub use config::{Config, ConfigError};
pub use error::RelayError;
pub use event::{Event, RelayResponse};
pub use handler::Relay;
pub use queue::{MemoryQueue, MessageQueue, OutboundMessage, SqsQueue};
pub use web::AppState;
