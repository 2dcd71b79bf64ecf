//! Configuration module for environment variable parsing.
//!
//! The relay reads its configuration once at process start and hands the
//! resulting [`Config`] to the handler. Nothing here is global.

use std::env;

use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors raised while reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing or empty")]
    Missing(&'static str),
}

/// Relay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination queue URL every message is sent to
    pub queue_url: String,

    /// Static shared secret expected as the bearer token
    pub secret: String,

    /// Reject direct invocations that carry no `headers` entry
    pub strict_headers: bool,

    /// Optional SQS endpoint override (LocalStack, ElasticMQ)
    pub sqs_endpoint_url: Option<String>,

    /// Port for the local web front end to listen on
    pub port: u16,
}

impl Config {
    /// Build a configuration directly, with the remaining fields defaulted.
    pub fn new(queue_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Config {
            queue_url: queue_url.into(),
            secret: secret.into(),
            strict_headers: false,
            sqs_endpoint_url: None,
            port: 8080,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config {
            queue_url: required("QUEUE_URL")?,

            secret: required("SECRET")?,

            strict_headers: parse_bool("STRICT_HEADERS", false),

            sqs_endpoint_url: optional("SQS_ENDPOINT_URL"),

            port: env::var("PORT")
                .ok()
                .and_then(|v| match v.trim().parse() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!(env_var = "PORT", value = %v, "Invalid port, using default");
                        None
                    }
                })
                .unwrap_or(8080),
        };

        info!(
            queue_url = %config.queue_url,
            secret_set = !config.secret.is_empty(),
            strict_headers = config.strict_headers,
            sqs_endpoint_url = ?config.sqs_endpoint_url,
            port = config.port,
            "config_loaded"
        );

        Ok(config)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean flag, accepting the usual spellings.
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => return default,
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => true,
        "0" | "f" | "false" | "no" | "off" => false,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid boolean, using default");
            default
        }
    }
}
