//! Width-aware text helpers for the chat screen

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wrap `text` to at most `width` display columns per line
///
/// Explicit newlines start a new line, blank lines are kept, and words wider
/// than `width` are broken between characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
                continue;
            }

            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if line_width > 0 && line_width + ch_width > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += ch_width;
            }
        }

        lines.push(line);
    }

    lines
}

/// The widest suffix of `text` that fits in `width` columns
pub fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        start = idx;
    }
    &text[start..]
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod text_tests;
