//! Application shell: screen routing between the welcome screen and a chat
//! session

mod events;
mod render;
mod state;

pub use state::{App, Screen};
