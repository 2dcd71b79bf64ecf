//! Local HTTP front end.
//!
//! Emulates a function URL in front of the relay:
//! - Turns each HTTP request into a gateway event
//! - Runs it through the same [`Relay`](crate::Relay) the Lambda binary uses
//! - Returns the handler's status and body
//!
//! Useful for running the relay outside Lambda, e.g. against LocalStack.

pub mod handlers;

pub use handlers::{gateway_event, health, relay_request, AppState, HealthResponse};
