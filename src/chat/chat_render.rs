//! Chat screen rendering
//!
//! Transcript on top, optional error banner, the input line with its ghost
//! suggestion, and a key hint line at the bottom.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::controller::ChatController;
use super::text::{visible_tail, wrap_text};
use crate::category::Category;
use crate::transcript::{Entry, Role, TranscriptStore};

const INPUT_PLACEHOLDER: &str = "Ask anything about love and relationships...";
const HINTS: &str = " Enter send · Tab/→ accept suggestion · PgUp/PgDn scroll · Esc back ";

/// Typing indicator frames, advanced every few render frames
const PENDING_FRAMES: [&str; 4] = ["●○○", "○●○", "○○●", "○●○"];
const FRAMES_PER_STEP: u64 = 6;

/// Wrapped transcript lines, reused until the transcript or width changes
///
/// Only the typing indicator depends on the frame count, so it is appended
/// fresh on every render.
#[derive(Debug, Default)]
pub struct TranscriptLayout {
    key: Option<(u64, u16)>,
    settled: Vec<Line<'static>>,
    pending: bool,
}

impl TranscriptLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget cached lines; revisions restart with every session
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn lines(
        &mut self,
        transcript: &TranscriptStore,
        width: u16,
        frame_count: u64,
    ) -> Vec<Line<'static>> {
        let key = (transcript.revision(), width);
        if self.key != Some(key) {
            self.settled = settled_lines(transcript.snapshot(), width);
            self.pending = transcript.last().is_some_and(Entry::is_pending);
            self.key = Some(key);
        }

        let mut lines = self.settled.clone();
        if self.pending {
            lines.push(pending_line(frame_count));
        }
        lines
    }
}

pub fn render_screen(
    chat: &mut ChatController,
    layout: &mut TranscriptLayout,
    frame: &mut Frame,
    area: Rect,
    frame_count: u64,
) {
    let banner = chat.error_banner();
    let areas = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(if banner.is_some() { 1 } else { 0 }),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    render_transcript(chat, layout, frame, areas[0], frame_count);
    if let Some(banner) = banner {
        render_banner(frame, areas[1], &banner);
    }
    render_input(chat, frame, areas[2]);
    render_hints(chat, frame, areas[3]);
}

fn title(category: Category) -> String {
    match category {
        Category::None => " OpenLove AI ".to_string(),
        other => format!(" OpenLove AI · {} ", other.title()),
    }
}

fn render_transcript(
    chat: &mut ChatController,
    layout: &mut TranscriptLayout,
    frame: &mut Frame,
    area: Rect,
    frame_count: u64,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title(chat.category()))
        .border_style(Style::default().fg(Color::Magenta));

    let inner = block.inner(area);
    let lines = layout.lines(chat.transcript(), inner.width, frame_count);

    let scroll = chat.scroll_mut();
    scroll.update_bounds(lines.len() as u32, inner.height);
    let offset = scroll.offset;

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

/// Lay out entries as bubbles: user right-aligned, assistant left-aligned
pub fn transcript_lines(entries: &[Entry], width: u16, frame_count: u64) -> Vec<Line<'static>> {
    let mut lines = settled_lines(entries, width);
    if entries.last().is_some_and(Entry::is_pending) {
        lines.push(pending_line(frame_count));
    }
    lines
}

/// Everything but the typing indicator, which only a pending entry shows
fn settled_lines(entries: &[Entry], width: u16) -> Vec<Line<'static>> {
    // Bubbles take at most three quarters of the width
    let bubble_width = (width as usize * 3 / 4).max(10);
    let mut lines = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }

        match entry.role {
            Role::User => {
                for text in wrap_text(&entry.content, bubble_width) {
                    lines.push(
                        Line::from(Span::styled(
                            format!("{text} "),
                            Style::default().fg(Color::Cyan),
                        ))
                        .alignment(Alignment::Right),
                    );
                }
            }
            Role::Assistant => {
                for text in wrap_text(&entry.content, bubble_width) {
                    lines.push(Line::from(vec![
                        Span::styled("│ ", Style::default().fg(Color::Magenta)),
                        Span::styled(text, Style::default().fg(Color::White)),
                    ]));
                }
            }
            Role::Pending => {}
        }
    }

    lines
}

fn pending_line(frame_count: u64) -> Line<'static> {
    let step = (frame_count / FRAMES_PER_STEP) as usize % PENDING_FRAMES.len();
    Line::from(vec![
        Span::styled("│ ", Style::default().fg(Color::Magenta)),
        Span::styled(
            PENDING_FRAMES[step],
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_banner(frame: &mut Frame, area: Rect, banner: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" ⚠ {banner} "),
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        Span::styled(" (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(chat: &ChatController, frame: &mut Frame, area: Rect) {
    let mut block_title = vec![Span::raw(" Message ")];
    if chat.queued_count() > 0 {
        block_title.push(Span::styled(
            format!("({} queued) ", chat.queued_count()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(block_title))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let viewport = inner.width as usize;

    let input = chat.input();
    let shown = visible_tail(input, viewport.saturating_sub(1));
    let mut spans = vec![Span::raw(shown.to_string())];

    if input.is_empty() {
        spans.push(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    } else if let Some(suggestion) = chat.suggestion() {
        spans.push(Span::styled(
            suggestion.remainder.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x + (shown.width() as u16).min(inner.width - 1);
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// Key hints, or the next queued message while one is waiting
fn render_hints(chat: &ChatController, frame: &mut Frame, area: Rect) {
    let line = match chat.next_queued() {
        Some(next) => {
            let mut spans = vec![
                Span::styled(" Up next: ", Style::default().fg(Color::Yellow)),
                Span::raw(next.to_string()),
            ];
            let more = chat.queued_count() - 1;
            if more > 0 {
                spans.push(Span::styled(
                    format!(" (+{more} more)"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(HINTS, Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[path = "chat_render_tests.rs"]
mod chat_render_tests;
