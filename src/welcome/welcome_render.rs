use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::welcome_state::{WELCOME_OPTIONS, WelcomeState};
use crate::category::Category;

const CARD_HEIGHT: u16 = 4;
const HINTS: &str = " ↑/↓ choose · Enter open · Esc quit ";

/// Render the welcome screen; `notice` is shown above the key hints
pub fn render_screen(state: &WelcomeState, notice: Option<&str>, frame: &mut Frame, area: Rect) {
    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(WELCOME_OPTIONS.iter().map(|_| Constraint::Length(CARD_HEIGHT)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(if notice.is_some() { 1 } else { 0 }));
    constraints.push(Constraint::Length(1));
    let layout = Layout::vertical(constraints).split(area);

    render_header(frame, layout[0]);

    for (i, category) in WELCOME_OPTIONS.iter().enumerate() {
        render_card(frame, layout[i + 1], *category, i == state.selected());
    }

    let footer = WELCOME_OPTIONS.len() + 2;
    if let Some(notice) = notice {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {notice}"),
                Style::default().fg(Color::Yellow),
            ))),
            layout[footer],
        );
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            HINTS,
            Style::default().fg(Color::DarkGray),
        ))),
        layout[footer + 1],
    );
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "OpenLove",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your AI relationship coach",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "What's on your mind?",
            Style::default().fg(Color::White),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_card(frame: &mut Frame, area: Rect, category: Category, selected: bool) {
    let border_color = if selected { Color::Magenta } else { Color::DarkGray };

    // The last row opens chat without a category
    let (title, body) = match category {
        Category::None => (
            " Start chatting → ".to_string(),
            category.description().to_string(),
        ),
        other => (format!(" {} ", other.title()), other.description().to_string()),
    };

    let title_style = if selected {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let card = Paragraph::new(Line::from(Span::styled(
        body,
        Style::default().fg(Color::Gray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, title_style))
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(card, area);
}

#[cfg(test)]
#[path = "welcome_render_tests.rs"]
mod welcome_render_tests;
