//! Inbound event and response types.
//!
//! The event is kept as a raw JSON value: a direct invocation forwards the
//! whole document unchanged, so nothing may be dropped by a typed decode.

use serde::Serialize;
use serde_json::{Map, Value};

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// One inbound invocation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    raw: Value,
}

impl Event {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Serialize the whole event back to JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.raw)
    }

    /// HTTP headers, if the event came through a gateway.
    ///
    /// A missing entry and an explicit `null` both mean "no headers".
    pub fn headers(&self) -> Option<Headers<'_>> {
        match self.raw.get("headers") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Headers(value.as_object())),
        }
    }

    /// The raw request body, when it is a string.
    pub fn body(&self) -> Option<&str> {
        self.raw.get("body").and_then(Value::as_str)
    }
}

/// Borrowed view of an event's `headers` mapping.
///
/// A non-object `headers` value behaves like an empty mapping.
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a>(Option<&'a Map<String, Value>>);

impl<'a> Headers<'a> {
    /// Look up a header, preferring an exact name match over a case-insensitive one.
    ///
    /// A `null` value counts as absent.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let map = self.0?;
        map.get(name).filter(|value| !value.is_null()).or_else(|| {
            map.iter()
                .find(|(key, value)| key.eq_ignore_ascii_case(name) && !value.is_null())
                .map(|(_, value)| value)
        })
    }
}

/// Extract the bearer token from an authorization value.
///
/// The value is split on whitespace into at most two fields, `<scheme> <token>`.
/// Returns `None` when there is no second field.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (_scheme, rest) = value.trim_start().split_once(char::is_whitespace)?;
    let token = rest.trim_start();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Response returned to the caller (Lambda runtime or HTTP gateway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub status_code: u16,
    pub body: String,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: "ok".to_string(),
        }
    }

    pub fn forbidden() -> Self {
        Self {
            status_code: 403,
            body: "forbidden".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_absent_or_null() {
        assert!(Event::new(json!({"body": "x"})).headers().is_none());
        assert!(Event::new(json!({"headers": null})).headers().is_none());
        assert!(Event::new(json!({"headers": {}})).headers().is_some());
    }

    #[test]
    fn test_headers_lookup() {
        let event = Event::new(json!({
            "headers": {"Authorization": "Bearer a", "x-other": "1"}
        }));
        let headers = event.headers().unwrap();
        assert_eq!(headers.get("authorization"), Some(&json!("Bearer a")));
        assert_eq!(headers.get("X-Other"), Some(&json!("1")));
        assert!(headers.get("missing").is_none());
    }

    #[test]
    fn test_headers_not_an_object() {
        let event = Event::new(json!({"headers": "nope"}));
        let headers = event.headers().unwrap();
        assert!(headers.get(AUTHORIZATION_HEADER).is_none());
    }

    #[test]
    fn test_null_header_is_absent() {
        let event = Event::new(json!({"headers": {"authorization": null}}));
        assert!(event.headers().unwrap().get(AUTHORIZATION_HEADER).is_none());
    }

    #[test]
    fn test_body() {
        assert_eq!(Event::new(json!({"body": "hello"})).body(), Some("hello"));
        assert_eq!(Event::new(json!({"body": 5})).body(), None);
        assert_eq!(Event::new(json!({})).body(), None);
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer secret"), Some("secret"));
        assert_eq!(bearer_token("  Bearer \t secret"), Some("secret"));
        assert_eq!(bearer_token("Bearer a b"), Some("a b"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_value(RelayResponse::forbidden()).unwrap();
        assert_eq!(json, json!({"statusCode": 403, "body": "forbidden"}));
    }
}
