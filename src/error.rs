use std::path::PathBuf;

use thiserror::Error;

/// Custom error types for openlove
#[derive(Debug, Error)]
pub enum OpenLoveError {
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error(
        "Webhook URL not configured.\n\nSet `url` under [webhook] in the config file or export OPENLOVE_WEBHOOK_URL."
    )]
    WebhookNotConfigured,

    #[error("Invalid webhook URL {url}: {message}")]
    InvalidWebhookUrl { url: String, message: String },

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
