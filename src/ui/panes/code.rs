//! Pseudocode pane
//!
//! Shows the selected family's listing with the line bound to the current
//! action tag highlighted. Keywords get a light touch of colour; the listing
//! is short enough that no real tokenizer is needed.

use super::utils::pane_block;
use crate::highlight::LineId;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYWORDS: &[&str] = &[
    "for", "while", "if", "elif", "else", "return", "break", "in", "and", "or", "not",
];

fn highlight_pseudocode(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>| {
        if word.is_empty() {
            return;
        }
        let style = if KEYWORDS.contains(&word.as_str()) {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            Style::default().fg(DEFAULT_THEME.number)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(std::mem::take(word), style));
    };

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush(&mut word, &mut spans);
            spans.push(Span::styled(
                c.to_string(),
                Style::default().fg(DEFAULT_THEME.fg),
            ));
        }
    }
    flush(&mut word, &mut spans);
    spans
}

/// Render the pseudocode pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    listing: &[&str],
    current: Option<LineId>,
    is_focused: bool,
) {
    let block = pane_block(" Pseudocode ", is_focused);

    let lines: Vec<Line> = listing
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let line_num = idx + 1;
            let is_current = current == Some(LineId(line_num));

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            let mut content = highlight_pseudocode(text);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content {
                    span.style = span.style.patch(bg);
                }
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
