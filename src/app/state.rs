use std::sync::Arc;

use crate::category::Category;
use crate::chat::ChatController;
use crate::chat::chat_render::TranscriptLayout;
use crate::config::Config;
use crate::reply::{FailureKind, ReplyService};
use crate::suggestion::SuggestionIndex;
use crate::welcome::WelcomeState;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Chat,
}

/// Application state
///
/// Holds at most one chat session. Entering chat starts a session bound to a
/// category; leaving for the welcome screen ends it.
pub struct App<S> {
    screen: Screen,
    pub welcome: WelcomeState,
    chat: Option<ChatController>,
    layout: TranscriptLayout,
    service: Result<S, FailureKind>,
    index: Arc<SuggestionIndex>,
    greeting: String,
    history_window: usize,
    notice: Option<String>,
    pub frame_count: u64,
    should_quit: bool,
}

impl<S: ReplyService + Clone> App<S> {
    /// `service` is shared by every session; an `Err` answers each message
    /// with that failure's fallback
    pub fn new(config: &Config, service: Result<S, FailureKind>) -> Self {
        Self {
            screen: Screen::Welcome,
            welcome: WelcomeState::new(),
            chat: None,
            layout: TranscriptLayout::new(),
            service,
            index: Arc::new(SuggestionIndex::new(config.chat.suggestions.iter().cloned())),
            greeting: config.chat.greeting.clone(),
            history_window: config.webhook.history_window,
            notice: None,
            frame_count: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn chat(&self) -> Option<&ChatController> {
        self.chat.as_ref()
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatController> {
        self.chat.as_mut()
    }

    /// Active session together with its cached transcript layout
    pub(super) fn chat_with_layout(
        &mut self,
    ) -> Option<(&mut ChatController, &mut TranscriptLayout)> {
        self.chat.as_mut().map(|chat| (chat, &mut self.layout))
    }

    /// Message shown on the welcome screen, e.g. a config warning
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Switch screens
    ///
    /// Entering chat starts a session in `category` unless one is already
    /// running; a running session keeps the category it started with.
    /// Returning to the welcome screen ends the session.
    pub fn navigate_to(&mut self, screen: Screen, category: Category) {
        match screen {
            Screen::Chat => match self.chat.as_ref().map(ChatController::category) {
                Some(active) if active != category => {
                    log::debug!(
                        "Session already bound to {}, ignoring {}",
                        active.id(),
                        category.id()
                    );
                }
                Some(_) => {}
                None => self.start_session(category),
            },
            Screen::Welcome => {
                if let Some(mut chat) = self.chat.take() {
                    chat.end_session();
                    log::debug!("Chat session {} ended", chat.conversation_id());
                }
                self.welcome.select(category);
            }
        }
        self.screen = screen;
    }

    /// Pick a category on the welcome screen and enter chat
    pub fn on_select_category(&mut self, category: Category) {
        self.welcome.select(category);
        self.navigate_to(Screen::Chat, category);
    }

    /// Apply finished replies; returns true if the transcript changed
    pub fn poll_replies(&mut self) -> bool {
        self.chat.as_mut().is_some_and(ChatController::poll_replies)
    }

    fn start_session(&mut self, category: Category) {
        let mut chat = ChatController::new(
            category,
            Arc::clone(&self.index),
            &self.greeting,
            self.history_window,
        );
        chat.connect(self.service.clone());
        self.layout.reset();
        self.chat = Some(chat);
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
