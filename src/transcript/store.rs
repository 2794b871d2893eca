use chrono::{DateTime, Utc};
use thiserror::Error;

use super::entry::{Entry, EntryId, Role};

/// Contract violations reported by the transcript store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Nothing may be appended while a reply placeholder is outstanding
    #[error("pending entry {existing} is still outstanding")]
    PendingOutstanding { existing: EntryId },
}

/// How a reply was committed by [`TranscriptStore::resolve_pending`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The pending entry at `index` was replaced in place
    Replaced { index: usize, id: EntryId },
    /// There was no pending entry, so the reply was appended
    Appended { id: EntryId },
}

impl Resolution {
    pub fn id(&self) -> EntryId {
        match self {
            Resolution::Replaced { id, .. } | Resolution::Appended { id } => *id,
        }
    }
}

/// Ordered chat log, oldest entry first
///
/// Append-only except for the pending placeholder, which is either replaced
/// in place by the reply or discarded when its request is abandoned. While a
/// placeholder exists it is always the last entry.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    entries: Vec<Entry>,
    next_id: u64,
    revision: u64,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end
    ///
    /// Pending entries never carry content. Fails while another pending
    /// entry is outstanding.
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<EntryId, TranscriptError> {
        self.ensure_no_pending()?;
        let content = match role {
            Role::Pending => String::new(),
            _ => content.into(),
        };
        let id = self.push(role, content);
        self.revision += 1;
        Ok(id)
    }

    /// Append a user message and its reply placeholder in one mutation
    ///
    /// Readers never observe the user entry without its placeholder.
    pub fn append_exchange(
        &mut self,
        message: impl Into<String>,
    ) -> Result<(EntryId, EntryId), TranscriptError> {
        self.ensure_no_pending()?;
        let user = self.push(Role::User, message.into());
        let pending = self.push(Role::Pending, String::new());
        self.revision += 1;
        Ok((user, pending))
    }

    /// Commit an assistant reply
    ///
    /// Replaces the pending entry in place under a fresh id. With no pending
    /// entry the reply is appended instead, so a late completion is never lost.
    pub fn resolve_pending(&mut self, content: impl Into<String>) -> Resolution {
        let content = content.into();
        let created_at = self.next_timestamp();
        let resolution = match self.pending_index() {
            Some(index) => {
                let id = self.allocate_id();
                self.entries[index] = Entry {
                    id,
                    role: Role::Assistant,
                    content,
                    created_at,
                };
                Resolution::Replaced { index, id }
            }
            None => Resolution::Appended {
                id: self.push(Role::Assistant, content),
            },
        };
        self.revision += 1;
        resolution
    }

    /// Drop the pending entry of an abandoned request
    pub fn discard_pending(&mut self) -> Option<Entry> {
        let index = self.pending_index()?;
        self.revision += 1;
        Some(self.entries.remove(index))
    }

    pub fn pending(&self) -> Option<&Entry> {
        self.pending_index().map(|index| &self.entries[index])
    }

    pub fn has_pending(&self) -> bool {
        self.pending_index().is_some()
    }

    /// Current entries in conversation order
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    /// The last `limit` finished entries, oldest first
    pub fn recent_history(&self, limit: usize) -> Vec<Entry> {
        let finished: Vec<&Entry> = self.entries.iter().filter(|e| !e.is_pending()).collect();
        let skip = finished.len().saturating_sub(limit);
        finished.into_iter().skip(skip).cloned().collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every mutation; renderers compare it to skip redundant work
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn ensure_no_pending(&self) -> Result<(), TranscriptError> {
        match self.pending() {
            Some(existing) => Err(TranscriptError::PendingOutstanding {
                existing: existing.id,
            }),
            None => Ok(()),
        }
    }

    fn pending_index(&self) -> Option<usize> {
        self.entries.iter().rposition(Entry::is_pending)
    }

    fn push(&mut self, role: Role, content: String) -> EntryId {
        let id = self.allocate_id();
        let created_at = self.next_timestamp();
        self.entries.push(Entry {
            id,
            role,
            content,
            created_at,
        });
        id
    }

    fn allocate_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId(self.next_id)
    }

    /// Wall clock, clamped so timestamps never go backwards in append order
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.entries.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
