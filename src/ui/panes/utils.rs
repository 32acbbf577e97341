//! Shared helpers for pane borders and value cells

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// How a single value cell should stand out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellMark {
    Plain,
    Active,
    Settled,
    Rejected,
    Outside,
}

pub(crate) fn cell(text: impl Into<String>, mark: CellMark) -> Span<'static> {
    let style = match mark {
        CellMark::Plain => Style::default().fg(DEFAULT_THEME.number),
        CellMark::Active => Style::default()
            .fg(DEFAULT_THEME.active)
            .bg(DEFAULT_THEME.current_line_bg)
            .add_modifier(Modifier::BOLD),
        CellMark::Settled => Style::default().fg(DEFAULT_THEME.settled),
        CellMark::Rejected => Style::default()
            .fg(DEFAULT_THEME.rejected)
            .add_modifier(Modifier::CROSSED_OUT),
        CellMark::Outside => Style::default().fg(DEFAULT_THEME.comment),
    };
    Span::styled(format!(" {:>4}", text.into()), style)
}

pub(crate) fn label(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.comment))
}

pub(crate) fn value(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(DEFAULT_THEME.fg))
}

/// `∞` for an unset distance or table entry
pub(crate) fn or_infinity(value: Option<u64>) -> String {
    value.map_or_else(|| "∞".to_string(), |v| v.to_string())
}

/// Keep `offset` inside `0..=total - visible`
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
