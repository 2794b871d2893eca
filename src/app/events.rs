use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::state::{App, Screen};
use crate::category::Category;
use crate::chat::ChatController;
use crate::reply::ReplyService;

/// Scroll step for arrow keys in the transcript
const LINE_STEP: u16 = 1;

impl<S: ReplyService + Clone> App<S> {
    /// Wait up to `timeout` for one terminal event and handle it
    ///
    /// Returns without an event when the timeout passes, so the caller can
    /// poll for replies and redraw the pending indicator.
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_event(key);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl+C: Exit application from any screen
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.screen() {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.welcome.select_prev(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Tab => {
                self.welcome.select_next()
            }
            KeyCode::Enter => {
                let category = self.welcome.selected_category();
                self.on_select_category(category);
            }
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        let Some(chat) = self.chat_mut() else {
            self.navigate_to(Screen::Welcome, Category::None);
            return;
        };

        // Esc: dismiss the error banner first, then leave the session
        if key.code != KeyCode::Esc {
            handle_chat_input(chat, key);
        } else if chat.error_banner().is_some() {
            chat.dismiss_error();
        } else {
            // Highlight the card the session was started from
            let category = chat.category();
            self.navigate_to(Screen::Welcome, category);
        }
    }
}

/// Keys that edit the message, accept suggestions or scroll the transcript
fn handle_chat_input(chat: &mut ChatController, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            chat.on_submit();
        }
        KeyCode::Tab => {
            chat.on_accept_suggestion();
        }
        // Right arrow accepts only when there is ghost text to take
        KeyCode::Right if chat.suggestion().is_some() => {
            chat.on_accept_suggestion();
        }
        KeyCode::Backspace => {
            let mut text = chat.input().to_string();
            text.pop();
            chat.on_input_change(text);
        }
        // Ctrl+U: clear the line
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            chat.on_input_change(String::new());
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = chat.input().to_string();
            text.push(c);
            chat.on_input_change(text);
        }
        KeyCode::PageUp => chat.scroll_mut().page_up(),
        KeyCode::PageDown => chat.scroll_mut().page_down(),
        KeyCode::Up => chat.scroll_mut().scroll_up(LINE_STEP),
        KeyCode::Down => chat.scroll_mut().scroll_down(LINE_STEP),
        KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => {
            chat.scroll_mut().jump_to_top()
        }
        KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
            chat.scroll_mut().jump_to_bottom()
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
