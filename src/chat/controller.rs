use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use uuid::Uuid;

use super::worker::{ReplyCompletion, spawn_worker};
use crate::category::Category;
use crate::reply::{FailureKind, ReplyOutcome, ReplyRequest, ReplyService};
use crate::suggestion::{Suggestion, SuggestionIndex};
use crate::transcript::{Role, TranscriptScroll, TranscriptStore};

/// Per-message lifecycle
///
/// `Sending`, `Resolved` and `FallbackResolved` are passed through within a
/// single controller call; between calls the controller is either `Idle` or
/// `Awaiting` a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    Awaiting { request_id: u64 },
    Resolved,
    FallbackResolved,
}

/// What happened to a submitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing changed
    Ignored,
    /// Appended to the transcript and handed to the reply worker
    Sent { request_id: u64 },
    /// Another reply is outstanding; the message waits at `position` (1-based)
    Queued { position: usize },
}

/// One chat session bound to a category
///
/// Messages are answered strictly one at a time. A message submitted while a
/// reply is outstanding is queued and only enters the transcript once the
/// previous reply has landed, so the pending placeholder is always the last
/// entry and always belongs to the newest user message.
pub struct ChatController {
    category: Category,
    conversation_id: String,
    history_window: usize,
    index: Arc<SuggestionIndex>,
    transcript: TranscriptStore,
    scroll: TranscriptScroll,
    input: String,
    suggestion: Option<Suggestion>,
    state: ChatState,
    queued: VecDeque<String>,
    // Monotonically increasing, used to drop completions of abandoned requests
    request_id: u64,
    last_outcome: Option<ReplyOutcome>,
    last_failure: Option<FailureKind>,
    request_tx: Option<Sender<ReplyRequest>>,
    response_rx: Option<Receiver<ReplyCompletion>>,
}

impl ChatController {
    /// Start a session; a non-blank greeting becomes the first entry
    pub fn new(
        category: Category,
        index: Arc<SuggestionIndex>,
        greeting: &str,
        history_window: usize,
    ) -> Self {
        let mut transcript = TranscriptStore::new();
        if !greeting.trim().is_empty()
            && let Err(e) = transcript.append(Role::Assistant, greeting)
        {
            log::warn!("Greeting not added: {}", e);
        }

        let conversation_id = format!("openlove_{}", Uuid::new_v4().simple());
        log::debug!(
            "Chat session {} started in category {}",
            conversation_id,
            category.id()
        );

        Self {
            category,
            conversation_id,
            history_window,
            index,
            transcript,
            scroll: TranscriptScroll::new(),
            input: String::new(),
            suggestion: None,
            state: ChatState::Idle,
            queued: VecDeque::new(),
            request_id: 0,
            last_outcome: None,
            last_failure: None,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Wire the controller to a reply worker
    pub fn set_channels(
        &mut self,
        request_tx: Sender<ReplyRequest>,
        response_rx: Receiver<ReplyCompletion>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Spawn a reply worker for this session
    pub fn connect<S: ReplyService>(&mut self, service: Result<S, FailureKind>) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_worker(service, request_rx, response_tx);
        self.set_channels(request_tx, response_rx);
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn scroll(&self) -> &TranscriptScroll {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut TranscriptScroll {
        &mut self.scroll
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ChatState::Awaiting { .. })
    }

    /// Messages waiting for the outstanding reply to land
    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }

    /// The message that will be sent once the outstanding reply lands
    pub fn next_queued(&self) -> Option<&str> {
        self.queued.front().map(String::as_str)
    }

    pub fn last_outcome(&self) -> Option<&ReplyOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn last_failure(&self) -> Option<&FailureKind> {
        self.last_failure.as_ref()
    }

    /// Banner text for the most recent failed reply
    pub fn error_banner(&self) -> Option<String> {
        self.last_failure.as_ref().map(FailureKind::banner)
    }

    pub fn dismiss_error(&mut self) {
        self.last_failure = None;
    }

    /// Replace the input text and recompute the suggestion
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.suggestion = self.index.suggest(&self.input);
    }

    /// Replace the input with the suggested question
    ///
    /// Returns false when there is nothing to accept.
    pub fn on_accept_suggestion(&mut self) -> bool {
        match self.suggestion.take() {
            Some(suggestion) => {
                self.input = suggestion.full;
                true
            }
            None => false,
        }
    }

    /// Submit the current input
    pub fn on_submit(&mut self) -> SubmitOutcome {
        let text = std::mem::take(&mut self.input);
        let outcome = self.submit(&text);
        if outcome == SubmitOutcome::Ignored {
            self.input = text;
        }
        outcome
    }

    /// Submit a message
    ///
    /// Blank text is ignored. Otherwise the input and suggestion are cleared
    /// and the trimmed message is either sent or queued behind the
    /// outstanding request.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.input.clear();
        self.suggestion = None;

        if self.is_awaiting() {
            self.queued.push_back(message.to_string());
            log::debug!(
                "Queued message behind request {} ({} waiting)",
                self.request_id,
                self.queued.len()
            );
            return SubmitOutcome::Queued {
                position: self.queued.len(),
            };
        }

        self.dispatch(message.to_string())
    }

    /// Drain completed replies from the worker
    ///
    /// A worker that has gone away (its thread panicked or exited) resolves
    /// the outstanding request with a network fallback and detaches the
    /// channels, so later messages get the unavailable-worker fallback
    /// instead of queueing forever. Returns true if the transcript changed.
    pub fn poll_replies(&mut self) -> bool {
        let Some(rx) = &self.response_rx else {
            return false;
        };

        let mut completions = Vec::new();
        let worker_gone = loop {
            match rx.try_recv() {
                Ok(completion) => completions.push(completion),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };

        if worker_gone {
            log::warn!("Reply worker stopped, detaching session {}", self.conversation_id);
            self.request_tx = None;
            self.response_rx = None;
        }

        let mut changed = false;
        for completion in completions {
            changed |= self.apply_completion(completion);
        }

        if worker_gone && let ChatState::Awaiting { request_id } = self.state {
            changed |= self.apply_completion(ReplyCompletion {
                request_id,
                outcome: ReplyOutcome::fallback(FailureKind::Network(
                    "reply worker stopped".to_string(),
                )),
            });
        }
        changed
    }

    /// Commit one completion to the transcript
    ///
    /// Completions for anything but the request in flight are dropped.
    pub fn apply_completion(&mut self, completion: ReplyCompletion) -> bool {
        let ChatState::Awaiting { request_id } = self.state else {
            log::warn!(
                "Dropping completion {} with no request in flight",
                completion.request_id
            );
            return false;
        };
        if completion.request_id != request_id {
            log::warn!(
                "Dropping stale completion {} (awaiting {})",
                completion.request_id,
                request_id
            );
            return false;
        }

        let outcome = completion.outcome;
        self.transcript.resolve_pending(outcome.content.clone());
        match &outcome.failure {
            Some(failure) => {
                self.last_failure = Some(failure.clone());
                self.transition(ChatState::FallbackResolved);
            }
            None => {
                self.last_failure = None;
                self.transition(ChatState::Resolved);
            }
        }
        self.last_outcome = Some(outcome);
        self.transition(ChatState::Idle);

        if let Some(next) = self.queued.pop_front() {
            self.dispatch(next);
        }
        true
    }

    /// Abandon the session: drop the outstanding request and queued messages
    ///
    /// The worker exits once the channels are dropped.
    pub fn end_session(&mut self) {
        if self.transcript.discard_pending().is_some() {
            log::debug!("Discarded pending reply of request {}", self.request_id);
        }
        self.queued.clear();
        self.request_tx = None;
        self.response_rx = None;
        self.transition(ChatState::Idle);
    }

    fn dispatch(&mut self, message: String) -> SubmitOutcome {
        self.transition(ChatState::Sending);

        // Context is what preceded the message
        let history = self.transcript.recent_history(self.history_window);
        if let Err(e) = self.transcript.append_exchange(message.clone()) {
            log::warn!("Cannot start a new exchange: {}", e);
            self.queued.push_front(message);
            self.transition(ChatState::Idle);
            return SubmitOutcome::Queued { position: 1 };
        }

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        self.transition(ChatState::Awaiting { request_id });
        self.scroll.jump_to_bottom();

        let request = ReplyRequest {
            request_id,
            message,
            category: self.category,
            conversation_id: self.conversation_id.clone(),
            history,
        };

        let delivered = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !delivered {
            log::warn!("Reply worker unavailable for request {}", request_id);
            self.apply_completion(ReplyCompletion {
                request_id,
                outcome: ReplyOutcome::fallback(FailureKind::NotConfigured(
                    "reply worker is not running".to_string(),
                )),
            });
        }

        SubmitOutcome::Sent { request_id }
    }

    fn transition(&mut self, next: ChatState) {
        if self.state != next {
            log::debug!("Chat state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
