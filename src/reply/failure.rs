use thiserror::Error;

pub const TIMEOUT_FALLBACK: &str =
    "That took longer than expected. Please try again with a shorter message.";
pub const NOT_FOUND_FALLBACK: &str =
    "I couldn't reach the advice service. The endpoint may be misconfigured.";
pub const AUTH_FALLBACK: &str = "There's an authentication issue with the advice service. Please check the webhook credentials.";
pub const UNAVAILABLE_FALLBACK: &str =
    "The advice service is temporarily unavailable. Please try again in a few moments.";
pub const GENERIC_FALLBACK: &str = "I apologize, but I'm experiencing some technical difficulties. Please try asking your question again in a moment.";
pub const MALFORMED_FALLBACK: &str =
    "I got a reply I couldn't read. Please try asking your question again.";
pub const EMPTY_RESPONSE_NOTICE: &str =
    "I received your message but got an empty response. Please try rephrasing your question.";
pub const NOT_CONFIGURED_FALLBACK: &str = "The advice service isn't set up yet. Add a webhook URL to the OpenLove config to start chatting.";

/// Why a webhook call produced no usable answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("Webhook returned HTTP {0}")]
    Transport(u16),

    /// Connection failed before any status was received
    #[error("Network error: {0}")]
    Network(String),

    /// Body looked like JSON but did not parse
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Success status without extractable content
    #[error("Empty response")]
    Empty,

    /// No usable webhook configuration
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl FailureKind {
    /// Assistant-style message shown in place of the missing reply
    pub fn fallback_message(&self) -> &'static str {
        match self {
            FailureKind::Timeout => TIMEOUT_FALLBACK,
            FailureKind::Transport(404) => NOT_FOUND_FALLBACK,
            FailureKind::Transport(401 | 403) => AUTH_FALLBACK,
            FailureKind::Transport(500..=599) => UNAVAILABLE_FALLBACK,
            FailureKind::Transport(_) | FailureKind::Network(_) => GENERIC_FALLBACK,
            FailureKind::Malformed(_) => MALFORMED_FALLBACK,
            FailureKind::Empty => EMPTY_RESPONSE_NOTICE,
            FailureKind::NotConfigured(_) => NOT_CONFIGURED_FALLBACK,
        }
    }

    /// One-line description for the session error banner
    pub fn banner(&self) -> String {
        match self {
            FailureKind::Timeout => "Connection issue: the advice service timed out".to_string(),
            FailureKind::Transport(code) => format!("Connection issue: HTTP {code}"),
            FailureKind::Network(_) => "Connection issue: could not reach the advice service".to_string(),
            FailureKind::Malformed(_) => "The advice service sent an unreadable reply".to_string(),
            FailureKind::Empty => "The advice service sent an empty reply".to_string(),
            FailureKind::NotConfigured(_) => "Webhook not configured".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod failure_tests;
