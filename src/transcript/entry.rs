use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Opaque entry identifier, unique within a transcript and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    /// Placeholder shown while a reply is outstanding
    Pending,
}

/// One transcript item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub role: Role,
    /// Empty for pending entries
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        self.role == Role::Pending
    }
}
