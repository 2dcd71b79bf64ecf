//! Amazon SQS implementation of [`MessageQueue`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::{error::DisplayErrorContext, Client};
use tracing::{error, info};

use super::{MessageQueue, OutboundMessage, SendReceipt};
use crate::error::RelayError;
use crate::Config;

/// SQS sender. Cloning shares the underlying client.
#[derive(Clone, Debug)]
pub struct SqsQueue {
    client: Client,
}

impl SqsQueue {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential and region chain.
    ///
    /// `sqs_endpoint_url` redirects the client to a local SQS emulator.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint) = &config.sqs_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        info!(
            region = ?sdk_config.region().map(|r| r.to_string()),
            endpoint_override = config.sqs_endpoint_url.is_some(),
            "sqs_client_created"
        );

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, RelayError> {
        // No message attributes are set.
        let output = self
            .client
            .send_message()
            .queue_url(&message.queue_url)
            .message_body(&message.body)
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                error!(queue_url = %message.queue_url, error = %detail, "sqs_send_failed");
                RelayError::Send {
                    queue_url: message.queue_url.clone(),
                    message: detail,
                }
            })?;

        let receipt = SendReceipt {
            message_id: output.message_id().map(str::to_string),
        };

        info!(
            queue_url = %message.queue_url,
            message_id = ?receipt.message_id,
            body_length = message.body.len(),
            "sqs_message_sent"
        );

        Ok(receipt)
    }
}
