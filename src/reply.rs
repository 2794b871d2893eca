//! Remote advice service: webhook payloads, response normalization and
//! failure fallbacks
//!
//! Every call resolves to a [`ReplyOutcome`]. Transport problems are folded
//! into a readable assistant message so the conversation can carry on.

use std::future::Future;

use crate::category::Category;
use crate::transcript::Entry;

mod client;
mod extract;
mod failure;
mod payload;

pub use client::{ReplyClient, interpret_body};
pub use extract::{ANSWER_FIELDS, WRAPPER_FIELDS, extract_reply, normalize_reply};
pub use failure::{
    AUTH_FALLBACK, EMPTY_RESPONSE_NOTICE, FailureKind, GENERIC_FALLBACK, MALFORMED_FALLBACK,
    NOT_CONFIGURED_FALLBACK, NOT_FOUND_FALLBACK, TIMEOUT_FALLBACK, UNAVAILABLE_FALLBACK,
};
pub use payload::{HistoryMessage, MessageKind, PayloadContext, SessionData, WebhookPayload};

/// One message to deliver to the advice service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    /// Controller-assigned id, echoed back with the completion
    pub request_id: u64,
    pub message: String,
    pub category: Category,
    pub conversation_id: String,
    /// Finished entries preceding the message, oldest first
    pub history: Vec<Entry>,
}

/// Text to show for a reply, plus the failure it stands in for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub content: String,
    pub failure: Option<FailureKind>,
}

impl ReplyOutcome {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            failure: None,
        }
    }

    pub fn fallback(failure: FailureKind) -> Self {
        Self {
            content: failure.fallback_message().to_string(),
            failure: Some(failure),
        }
    }

    pub fn was_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

impl From<Result<String, FailureKind>> for ReplyOutcome {
    fn from(result: Result<String, FailureKind>) -> Self {
        match result {
            Ok(content) => ReplyOutcome::success(content),
            Err(failure) => ReplyOutcome::fallback(failure),
        }
    }
}

/// Anything that can answer a [`ReplyRequest`]
///
/// Implementations never fail outright; failures come back as fallback
/// outcomes.
pub trait ReplyService: Send + 'static {
    fn reply(&self, request: &ReplyRequest) -> impl Future<Output = ReplyOutcome> + Send;
}
