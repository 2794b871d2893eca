//! Welcome screen: category cards and the "Start chatting" entry

pub mod welcome_render;
mod welcome_state;

pub use welcome_state::{WELCOME_OPTIONS, WelcomeState};
