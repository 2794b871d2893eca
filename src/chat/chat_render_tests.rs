use std::sync::Arc;
use std::sync::mpsc;

use super::*;
use crate::suggestion::SuggestionIndex;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

const GREETING: &str = "Hi there ! I'm OpenLove AI.\nHow can I help you today?";

fn chat(category: Category) -> ChatController {
    ChatController::new(category, Arc::new(SuggestionIndex::default()), GREETING, 5)
}

/// Controller with a live request channel, so submissions stay pending
fn awaiting_chat() -> (ChatController, mpsc::Receiver<crate::reply::ReplyRequest>) {
    let mut chat = chat(Category::Dating);
    let (request_tx, request_rx) = mpsc::channel();
    let (_response_tx, response_rx) = mpsc::channel();
    chat.set_channels(request_tx, response_rx);
    (chat, request_rx)
}

fn render_to_string(chat: &mut ChatController, width: u16, height: u16, frame_count: u64) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| {
            render_screen(
                chat,
                &mut TranscriptLayout::new(),
                f,
                f.area(),
                frame_count,
            )
        })
        .unwrap();
    terminal.backend().to_string()
}

#[test]
fn test_renders_greeting_and_category_title() {
    let mut chat = chat(Category::Romance);
    let output = render_to_string(&mut chat, 80, 20, 0);

    assert!(output.contains("OpenLove AI · Love and Romance"));
    assert!(output.contains("Hi there ! I'm OpenLove AI."));
    assert!(output.contains("How can I help you today?"));
}

#[test]
fn test_untitled_session_shows_plain_title() {
    let mut chat = chat(Category::None);
    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains(" OpenLove AI "));
    assert!(!output.contains("Ask anything ·"));
}

#[test]
fn test_empty_input_shows_placeholder() {
    let mut chat = chat(Category::None);
    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains(INPUT_PLACEHOLDER));
}

#[test]
fn test_ghost_suggestion_follows_input() {
    let mut chat = chat(Category::None);
    chat.on_input_change("How can I tell");
    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains("How can I tell if they're really into me?"));
    assert!(!output.contains(INPUT_PLACEHOLDER));
}

#[test]
fn test_pending_entry_animates() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit("Is this love?");

    let first = render_to_string(&mut chat, 80, 20, 0);
    let later = render_to_string(&mut chat, 80, 20, FRAMES_PER_STEP);

    assert!(first.contains("Is this love?"));
    assert!(first.contains(PENDING_FRAMES[0]));
    assert!(later.contains(PENDING_FRAMES[1]));
}

#[test]
fn test_queued_count_in_input_title() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit("first");
    chat.submit("second");

    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains("(1 queued)"));
}

#[test]
fn test_fallback_shows_banner() {
    // No worker attached: the reply resolves to a not-configured fallback
    let mut chat = chat(Category::None);
    chat.submit("hello");

    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains("⚠ Webhook not configured"));
    assert!(output.contains("Esc to dismiss"));

    chat.dismiss_error();
    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(!output.contains("Webhook not configured"));
}

#[test]
fn test_long_transcript_follows_tail() {
    let (mut chat, _requests) = awaiting_chat();
    chat.end_session();
    for i in 0..30 {
        chat.submit(&format!("message number {i}"));
    }

    let output = render_to_string(&mut chat, 80, 16, 0);
    assert!(output.contains("message number 29"));
    assert!(!output.contains("message number 0 "));
    assert!(chat.scroll().is_following());
    assert!(chat.scroll().max_offset > 0);
}

#[test]
fn test_user_lines_are_right_aligned() {
    let chat = {
        let (mut chat, _requests) = awaiting_chat();
        chat.submit("hello");
        chat
    };
    let lines = transcript_lines(chat.transcript().snapshot(), 60, 0);

    // greeting (2 lines), separator, user line, separator, pending
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].alignment, None);
    assert_eq!(lines[3].alignment, Some(Alignment::Right));
    assert_eq!(lines[5].spans[1].content, PENDING_FRAMES[0]);
}

#[test]
fn test_long_messages_wrap_within_bubble() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit(&"word ".repeat(40));
    let lines = transcript_lines(chat.transcript().snapshot(), 40, 0);

    let user_lines: Vec<_> = lines
        .iter()
        .filter(|l| l.alignment == Some(Alignment::Right))
        .collect();
    assert!(user_lines.len() > 1);
    assert!(user_lines.iter().all(|l| l.width() <= 31));
}

#[test]
fn test_queued_message_shown_in_hint_line() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit("first");
    chat.submit("second");
    chat.submit("third");

    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains("Up next: second (+1 more)"));
    assert!(!output.contains("Enter send"));
}

#[test]
fn test_hint_line_returns_when_queue_drains() {
    let mut chat = chat(Category::None);
    let output = render_to_string(&mut chat, 80, 20, 0);
    assert!(output.contains("Enter send"));
    assert!(!output.contains("Up next"));
}

#[test]
fn test_layout_reuses_lines_until_revision_changes() {
    let (mut chat, _requests) = awaiting_chat();
    let mut layout = TranscriptLayout::new();

    let first = layout.lines(chat.transcript(), 60, 0);
    layout.settled.push(Line::from("cached marker"));
    let again = layout.lines(chat.transcript(), 60, 0);
    assert_eq!(again.len(), first.len() + 1);

    chat.submit("hello");
    let rebuilt = layout.lines(chat.transcript(), 60, 0);
    assert_eq!(rebuilt, transcript_lines(chat.transcript().snapshot(), 60, 0));
}

#[test]
fn test_layout_rebuilds_on_width_change() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit(&"word ".repeat(30));
    let mut layout = TranscriptLayout::new();

    let wide = layout.lines(chat.transcript(), 120, 0);
    let narrow = layout.lines(chat.transcript(), 30, 0);
    assert!(narrow.len() > wide.len());
    assert_eq!(narrow, transcript_lines(chat.transcript().snapshot(), 30, 0));
}

#[test]
fn test_layout_animates_pending_without_rebuild() {
    let (mut chat, _requests) = awaiting_chat();
    chat.submit("Is this love?");
    let mut layout = TranscriptLayout::new();

    let first = layout.lines(chat.transcript(), 60, 0);
    let later = layout.lines(chat.transcript(), 60, FRAMES_PER_STEP);
    assert_eq!(first.len(), later.len());
    assert_eq!(first.last().unwrap().spans[1].content, PENDING_FRAMES[0]);
    assert_eq!(later.last().unwrap().spans[1].content, PENDING_FRAMES[1]);
}
