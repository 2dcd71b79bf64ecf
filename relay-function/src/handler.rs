//! The event relay handler.
//!
//! One call per invocation:
//! 1. Log the full incoming event
//! 2. Direct invocation (no `headers`): forward the whole serialized event
//! 3. Gateway invocation: check the bearer token, then forward `body` verbatim
//!
//! Authorization rejections become a 403 response. Queue failures are not
//! caught here; they abort the invocation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::authorize;
use crate::error::RelayError;
use crate::event::{Event, RelayResponse};
use crate::queue::{MessageQueue, OutboundMessage};
use crate::Config;

/// Authorizes events and relays them onto the configured queue.
///
/// Holds only immutable state, so one instance serves concurrent invocations.
#[derive(Clone)]
pub struct Relay {
    config: Arc<Config>,
    queue: Arc<dyn MessageQueue>,
}

impl Relay {
    pub fn new(config: Config, queue: impl MessageQueue + 'static) -> Self {
        Self {
            config: Arc::new(config),
            queue: Arc::new(queue),
        }
    }

    /// Handle one event.
    pub async fn handle(&self, event: &Event) -> Result<RelayResponse, RelayError> {
        let event_json = event.to_json()?;
        info!(event = %event_json, "event_received");

        let headers = match event.headers() {
            Some(headers) => headers,
            None if self.config.strict_headers => {
                warn!("event_missing_headers");
                return Err(RelayError::MissingHeaders);
            }
            None => {
                info!("direct_invocation");
                self.enqueue(event_json).await?;
                return Ok(RelayResponse::ok());
            }
        };

        if authorize(&headers, &self.config.secret).is_err() {
            return Ok(RelayResponse::forbidden());
        }

        let body = event.body().ok_or_else(|| {
            warn!("event_missing_body");
            RelayError::MissingBody
        })?;

        info!("gateway_invocation_authorized");
        self.enqueue(body.to_string()).await?;

        Ok(RelayResponse::ok())
    }

    async fn enqueue(&self, body: String) -> Result<(), RelayError> {
        let message = OutboundMessage::new(self.config.queue_url.clone(), body);
        let receipt = self.queue.send(&message).await?;

        info!(
            queue_url = %message.queue_url,
            message_id = ?receipt.message_id,
            body_length = message.body.len(),
            "event_enqueued"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::MemoryQueue;
    use serde_json::{json, Value};

    const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/gateboard";

    fn setup(strict_headers: bool) -> (Relay, MemoryQueue) {
        let mut config = Config::new(QUEUE_URL, "secret");
        config.strict_headers = strict_headers;
        let queue = MemoryQueue::new();
        (Relay::new(config, queue.clone()), queue)
    }

    fn gateway_event(authorization: Option<&str>, body: &str) -> Event {
        let mut headers = json!({"content-type": "application/json"});
        if let Some(auth) = authorization {
            headers["authorization"] = Value::String(auth.to_string());
        }
        Event::new(json!({"headers": headers, "body": body}))
    }

    #[tokio::test]
    async fn test_direct_invocation_enqueues_whole_event() {
        let (relay, queue) = setup(false);
        let raw = json!({"gateway_name": "gw1", "gateway_id": "abc"});

        let response = relay.handle(&Event::new(raw.clone())).await.unwrap();
        assert_eq!(response, RelayResponse::ok());

        let sent = queue.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].queue_url, QUEUE_URL);
        let forwarded: Value = serde_json::from_str(&sent[0].body).unwrap();
        assert_eq!(forwarded, raw);
    }

    #[tokio::test]
    async fn test_direct_invocation_keeps_key_order() {
        let (relay, queue) = setup(false);
        let raw: Value = serde_json::from_str(r#"{"zeta":1,"alpha":"é"}"#).unwrap();

        relay.handle(&Event::new(raw)).await.unwrap();

        assert_eq!(queue.sent().await[0].body, r#"{"zeta":1,"alpha":"é"}"#);
    }

    #[tokio::test]
    async fn test_null_headers_is_direct_invocation() {
        let (relay, queue) = setup(false);
        let response = relay
            .handle(&Event::new(json!({"headers": null, "body": "x"})))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(queue.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_missing_headers() {
        let (relay, queue) = setup(true);
        let err = relay
            .handle(&Event::new(json!({"body": "hello"})))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::MissingHeaders));
        assert!(queue.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_strict_mode_still_authorizes_gateway_events() {
        let (relay, queue) = setup(true);
        let response = relay
            .handle(&gateway_event(Some("Bearer secret"), "hello"))
            .await
            .unwrap();
        assert_eq!(response, RelayResponse::ok());
        assert_eq!(queue.sent().await[0].body, "hello");
    }

    #[tokio::test]
    async fn test_missing_authorization_is_forbidden() {
        let (relay, queue) = setup(false);
        let response = relay.handle(&gateway_event(None, "hello")).await.unwrap();
        assert_eq!(response, RelayResponse::forbidden());
        assert!(queue.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_authorization_is_forbidden() {
        let (relay, queue) = setup(false);
        for auth in ["Bearer", "", "   "] {
            let response = relay
                .handle(&gateway_event(Some(auth), "hello"))
                .await
                .unwrap();
            assert_eq!(response.status_code, 403, "authorization {:?}", auth);
        }
        assert!(queue.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_token_is_forbidden() {
        let (relay, queue) = setup(false);
        let response = relay
            .handle(&gateway_event(Some("Bearer wrong"), "hello"))
            .await
            .unwrap();
        assert_eq!(response, RelayResponse::forbidden());
        assert!(queue.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_valid_token_enqueues_body_verbatim() {
        let (relay, queue) = setup(false);
        let response = relay
            .handle(&gateway_event(Some("Bearer secret"), "hello"))
            .await
            .unwrap();
        assert_eq!(response, RelayResponse::ok());

        let sent = queue.sent().await;
        assert_eq!(sent, vec![OutboundMessage::new(QUEUE_URL, "hello")]);
    }

    #[tokio::test]
    async fn test_repeated_events_are_not_deduplicated() {
        let (relay, queue) = setup(false);
        let event = gateway_event(Some("Bearer secret"), "hello");

        for _ in 0..3 {
            let response = relay.handle(&event).await.unwrap();
            assert_eq!(response.status_code, 200);
        }

        assert_eq!(queue.sent().await.len(), 3);
    }

    #[tokio::test]
    async fn test_authorized_event_without_body_faults() {
        let (relay, queue) = setup(false);
        let event = Event::new(json!({"headers": {"authorization": "Bearer secret"}}));
        let err = relay.handle(&event).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingBody));
        assert!(queue.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_queue_failure_propagates() {
        let relay = Relay::new(
            Config::new(QUEUE_URL, "secret"),
            MemoryQueue::failing("queue unavailable"),
        );
        let err = relay
            .handle(&gateway_event(Some("Bearer secret"), "hello"))
            .await
            .unwrap_err();
        match err {
            RelayError::Send { queue_url, message } => {
                assert_eq!(queue_url, QUEUE_URL);
                assert_eq!(message, "queue unavailable");
            }
            other => panic!("Expected Send error, got {:?}", other),
        }
    }
}
