//! OpenLove: relationship-advice chat with inline question suggestions
//!
//! The core is UI-agnostic: [`suggestion::SuggestionIndex`] completes typed
//! questions, [`transcript::TranscriptStore`] keeps the ordered conversation,
//! [`reply`] talks to the advice webhook and [`chat::ChatController`] ties
//! them together for one session. [`app`] and [`welcome`] are the terminal
//! front-end.

pub mod app;
pub mod category;
pub mod chat;
pub mod config;
pub mod error;
pub mod reply;
pub mod suggestion;
pub mod transcript;
pub mod welcome;
