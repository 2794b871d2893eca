//! Inline question completion for the chat input
//!
//! Matches what the user has typed against a catalog of example questions and
//! offers the rest of the first matching question as ghost text.

mod catalog;
mod index;

pub use catalog::DEFAULT_CATALOG;
pub use index::{Suggestion, SuggestionIndex};
