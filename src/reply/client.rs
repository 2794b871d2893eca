//! Webhook client for the advice service

use std::time::Duration;

use chrono::Utc;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::extract::{extract_reply, normalize_reply};
use super::failure::FailureKind;
use super::payload::WebhookPayload;
use super::{ReplyOutcome, ReplyRequest, ReplyService};
use crate::config::WebhookConfig;
use crate::error::OpenLoveError;

/// API key header name used by n8n-style webhook auth
const API_KEY_HEADER: &str = "x-api-key";

/// POSTs chat messages to the configured webhook
#[derive(Debug, Clone)]
pub struct ReplyClient {
    http: reqwest::Client,
    url: Url,
    user_id: String,
    timeout: Duration,
}

impl ReplyClient {
    /// Create a client from the `[webhook]` config section
    ///
    /// Fails when the URL is missing or unusable, or a header cannot be
    /// encoded.
    pub fn from_config(config: &WebhookConfig) -> Result<Self, OpenLoveError> {
        let raw_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(OpenLoveError::WebhookNotConfigured)?;

        let url = Url::parse(raw_url).map_err(|e| OpenLoveError::InvalidWebhookUrl {
            url: raw_url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OpenLoveError::InvalidWebhookUrl {
                url: raw_url.to_string(),
                message: format!("unsupported scheme `{}`", url.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .default_headers(build_headers(config)?)
            .build()
            .map_err(|e| OpenLoveError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            url,
            user_id: config.user_id.clone(),
            timeout: config.timeout(),
        })
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Deliver one message; failures come back as fallback text
    pub async fn send(&self, request: &ReplyRequest) -> ReplyOutcome {
        let outcome = ReplyOutcome::from(self.post(request).await);
        if let Some(failure) = &outcome.failure {
            log::warn!(
                "Request {} resolved with fallback: {}",
                request.request_id,
                failure
            );
        }
        outcome
    }

    async fn post(&self, request: &ReplyRequest) -> Result<String, FailureKind> {
        let payload = WebhookPayload::new(request, &self.user_id, Utc::now());
        log::debug!(
            "Sending request {} to {} (history: {})",
            request.request_id,
            self.url,
            payload.context.previous_messages.len()
        );

        let response = self
            .http
            .post(self.url.clone())
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::debug!("Webhook returned {}: {}", status, detail);
            return Err(FailureKind::Transport(status.as_u16()));
        }

        let body = response.text().await.map_err(classify_error)?;
        interpret_body(&body)
    }
}

impl ReplyService for ReplyClient {
    async fn reply(&self, request: &ReplyRequest) -> ReplyOutcome {
        self.send(request).await
    }
}

/// Turn a successful response body into display text
///
/// The body is treated as JSON only when it starts with `{` or `[`;
/// anything else is taken as the reply itself.
pub fn interpret_body(body: &str) -> Result<String, FailureKind> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(FailureKind::Empty);
    }

    let payload = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        serde_json::from_str::<Value>(trimmed).map_err(|e| FailureKind::Malformed(e.to_string()))?
    } else {
        Value::String(trimmed.to_string())
    };

    extract_reply(&payload)
        .map(normalize_reply)
        .filter(|text| !text.is_empty())
        .ok_or(FailureKind::Empty)
}

fn classify_error(err: reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network(err.to_string())
    }
}

fn build_headers(config: &WebhookConfig) -> Result<HeaderMap, OpenLoveError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = config.auth_token.as_deref().filter(|t| !t.trim().is_empty()) {
        headers.insert(AUTHORIZATION, header_value("Authorization", &format!("Bearer {token}"))?);
    }
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        headers.insert(HeaderName::from_static(API_KEY_HEADER), header_value("X-API-Key", key)?);
    }

    for (name, value) in &config.headers {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            OpenLoveError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            }
        })?;
        headers.insert(header, header_value(name, value)?);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, OpenLoveError> {
    let mut value = HeaderValue::from_str(value).map_err(|e| OpenLoveError::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
