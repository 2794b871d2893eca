//! Chat session orchestration
//!
//! The controller owns the input line, the live suggestion and the
//! transcript. Replies are fetched on a background worker and applied when
//! the UI loop polls for them.

pub mod chat_render;
mod controller;
mod text;
mod worker;

pub use controller::{ChatController, ChatState, SubmitOutcome};
pub use text::{visible_tail, wrap_text};
pub use worker::{ReplyCompletion, spawn_worker};
