//! Bearer-token authorization for gateway invocations.
//!
//! The gateway forwards an `authorization: <scheme> <token>` header. The token
//! must equal the configured shared secret. Every rejection maps to the same
//! 403 response; the variants only differ in what gets logged.

use thiserror::Error;
use tracing::warn;

use crate::event::{bearer_token, Headers, AUTHORIZATION_HEADER};

/// Why a gateway invocation was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("missing header authorization")]
    Missing,

    #[error("missing token in header authorization")]
    Malformed,

    #[error("invalid token in header authorization")]
    Invalid,
}

impl AuthFailure {
    /// Short name used as the structured log event.
    pub fn event_name(&self) -> &'static str {
        match self {
            AuthFailure::Missing => "authorization_missing",
            AuthFailure::Malformed => "authorization_malformed",
            AuthFailure::Invalid => "authorization_invalid",
        }
    }
}

/// Check the `authorization` header against `secret`.
pub fn authorize(headers: &Headers<'_>, secret: &str) -> Result<(), AuthFailure> {
    let result = check(headers, secret);

    if let Err(failure) = result {
        warn!(reason = %failure, "{}", failure.event_name());
    }

    result
}

fn check(headers: &Headers<'_>, secret: &str) -> Result<(), AuthFailure> {
    let value = headers
        .get(AUTHORIZATION_HEADER)
        .ok_or(AuthFailure::Missing)?;

    // A non-string value cannot hold a token.
    let token = value
        .as_str()
        .and_then(bearer_token)
        .ok_or(AuthFailure::Malformed)?;

    if secret.is_empty() || !constant_time_compare(token, secret) {
        return Err(AuthFailure::Invalid);
    }

    Ok(())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
