//! Gateboard relay Lambda function.
//!
//! Receives events either directly or through a function URL, checks the
//! bearer token when HTTP headers are present, and forwards the payload to SQS.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{Config, Event, Relay, RelayResponse, SqsQueue};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).without_time())
        .init();

    tracing::info!("relay_lambda_starting");

    // Configuration and client are built once per cold start
    let config = Config::from_env()?;
    let queue = SqsQueue::from_config(&config).await;
    let relay = Relay::new(config, queue);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let relay = relay.clone();
        async move { invoke(&relay, event).await }
    }))
    .await
}

async fn invoke(relay: &Relay, event: LambdaEvent<Value>) -> Result<RelayResponse, Error> {
    let (payload, context) = event.into_parts();
    let span = tracing::info_span!("invocation", request_id = %context.request_id);

    let response = relay.handle(&Event::new(payload)).instrument(span).await?;
    Ok(response)
}
