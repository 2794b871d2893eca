use crate::category::Category;

/// Selectable rows, top to bottom: the category cards, then "Start chatting"
pub const WELCOME_OPTIONS: [Category; 5] = [
    Category::Dating,
    Category::Breakup,
    Category::Romance,
    Category::Communication,
    Category::None,
];

/// Highlighted row on the welcome screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WelcomeState {
    selected: usize,
}

impl WelcomeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_category(&self) -> Category {
        WELCOME_OPTIONS[self.selected]
    }

    /// Move down, wrapping to the first row
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % WELCOME_OPTIONS.len();
    }

    /// Move up, wrapping to the last row
    pub fn select_prev(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(WELCOME_OPTIONS.len() - 1);
    }

    pub fn select(&mut self, category: Category) {
        if let Some(index) = WELCOME_OPTIONS.iter().position(|c| *c == category) {
            self.selected = index;
        }
    }
}

#[cfg(test)]
#[path = "welcome_state_tests.rs"]
mod welcome_state_tests;
