use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::ReplyRequest;
use crate::category::Category;
use crate::transcript::{EntryId, Role};

/// JSON body POSTed to the webhook
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub message: &'a str,
    pub category: Category,
    pub conversation_id: &'a str,
    pub user_id: &'a str,
    /// ISO-8601, millisecond precision, UTC
    pub timestamp: String,
    pub context: PayloadContext<'a>,
}

#[derive(Debug, Serialize)]
pub struct PayloadContext<'a> {
    pub previous_messages: Vec<HistoryMessage<'a>>,
    pub session_data: SessionData,
}

/// A prior transcript entry, as the workflow sees it
#[derive(Debug, Serialize)]
pub struct HistoryMessage<'a> {
    pub id: EntryId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: &'a str,
    pub timestamp: String,
}

/// Sender of a history message on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
}

impl MessageKind {
    /// Pending placeholders have no wire form
    fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::User => Some(MessageKind::User),
            Role::Assistant => Some(MessageKind::Ai),
            Role::Pending => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionData {
    pub selected_category: Category,
    pub screen: &'static str,
}

impl<'a> WebhookPayload<'a> {
    pub fn new(request: &'a ReplyRequest, user_id: &'a str, now: DateTime<Utc>) -> Self {
        let previous_messages = request
            .history
            .iter()
            .filter_map(|entry| {
                Some(HistoryMessage {
                    id: entry.id,
                    kind: MessageKind::from_role(entry.role)?,
                    content: &entry.content,
                    timestamp: iso_timestamp(entry.created_at),
                })
            })
            .collect();

        Self {
            message: &request.message,
            category: request.category,
            conversation_id: &request.conversation_id,
            user_id,
            timestamp: iso_timestamp(now),
            context: PayloadContext {
                previous_messages,
                session_data: SessionData {
                    selected_category: request.category,
                    screen: "chat",
                },
            },
        }
    }
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod payload_tests;
