//! Chat transcript: ordered entries plus the pending-reply placeholder

mod entry;
mod scroll;
mod store;

pub use entry::{Entry, EntryId, Role};
pub use scroll::TranscriptScroll;
pub use store::{Resolution, TranscriptError, TranscriptStore};
