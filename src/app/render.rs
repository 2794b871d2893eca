use ratatui::Frame;

use super::state::{App, Screen};
use crate::chat::chat_render;
use crate::reply::ReplyService;
use crate::welcome::welcome_render;

impl<S: ReplyService + Clone> App<S> {
    pub fn render(&mut self, frame: &mut Frame) {
        self.frame_count = self.frame_count.wrapping_add(1);
        let area = frame.area();
        let frame_count = self.frame_count;

        if self.screen() == Screen::Chat
            && let Some((chat, layout)) = self.chat_with_layout()
        {
            chat_render::render_screen(chat, layout, frame, area, frame_count);
            return;
        }

        welcome_render::render_screen(&self.welcome, self.notice(), frame, area);
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
