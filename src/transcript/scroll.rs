/// Vertical scroll position over the rendered transcript
///
/// Follows the newest entry until the user scrolls up, and resumes following
/// once they scroll back to the bottom, so incoming replies never yank the
/// view away from what the user is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptScroll {
    pub offset: u16,
    pub max_offset: u16,
    pub viewport_height: u16,
    follow_tail: bool,
}

impl Default for TranscriptScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptScroll {
    pub fn new() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            viewport_height: 0,
            follow_tail: true,
        }
    }

    /// Recompute limits after layout; pins to the bottom while following
    pub fn update_bounds(&mut self, content_lines: u32, viewport_height: u16) {
        self.viewport_height = viewport_height;

        // Clamp to u16::MAX for ratatui compatibility
        self.max_offset = content_lines
            .saturating_sub(viewport_height as u32)
            .min(u16::MAX as u32) as u16;

        self.offset = if self.follow_tail {
            self.max_offset
        } else {
            self.offset.min(self.max_offset)
        };
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
        self.follow_tail = self.offset == self.max_offset;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.follow_tail = self.offset == self.max_offset;
    }

    pub fn page_down(&mut self) {
        let half_page = (self.viewport_height / 2).max(1);
        self.scroll_down(half_page);
    }

    pub fn page_up(&mut self) {
        let half_page = (self.viewport_height / 2).max(1);
        self.scroll_up(half_page);
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0;
        self.follow_tail = self.max_offset == 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.offset = self.max_offset;
        self.follow_tail = true;
    }

    pub fn is_following(&self) -> bool {
        self.follow_tail
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod scroll_tests;
