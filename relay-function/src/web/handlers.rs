//! HTTP endpoint handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

use crate::event::Event;
use crate::Relay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Relay
// =============================================================================

/// Build the gateway event a function URL would deliver for this request.
///
/// Header names are lower-case; repeated headers are joined with commas.
/// Values that are not valid UTF-8 are dropped. A body that is not valid
/// UTF-8 is base64-encoded and flagged with `isBase64Encoded`.
pub fn gateway_event(uri: &Uri, headers: &HeaderMap, body: &[u8]) -> Event {
    let mut header_map = Map::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            warn!(header = %name, "header_not_utf8");
            continue;
        };
        match header_map.get_mut(name.as_str()) {
            Some(Value::String(existing)) => {
                existing.push(',');
                existing.push_str(value);
            }
            _ => {
                header_map.insert(name.as_str().to_string(), Value::String(value.to_string()));
            }
        }
    }

    let (body, is_base64_encoded) = match std::str::from_utf8(body) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (STANDARD.encode(body), true),
    };

    Event::new(json!({
        "rawPath": uri.path(),
        "rawQueryString": uri.query().unwrap_or_default(),
        "headers": header_map,
        "body": body,
        "isBase64Encoded": is_base64_encoded,
    }))
}

/// Relay endpoint.
///
/// Handler faults have no response mapping of their own; they surface as 502.
pub async fn relay_request(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let event = gateway_event(&uri, &headers, &body);

    match state.relay.handle(&event).await {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, response.body)
        }
        Err(e) => {
            error!(error = %e, path = %uri.path(), "relay_failed");
            (StatusCode::BAD_GATEWAY, "error".to_string())
        }
    }
}
