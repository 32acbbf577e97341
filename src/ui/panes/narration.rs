//! Step narration pane

use super::utils::{clamp_scroll, pane_block};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the descriptions of every step played so far, newest last
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    played: &[Snapshot],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Steps ", is_focused);

    if played.is_empty() {
        let paragraph = Paragraph::new("(no trace)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let newest = played.len() - 1;
    let all_items: Vec<ListItem> = played
        .iter()
        .enumerate()
        .map(|(idx, snapshot)| {
            let text_style = if idx == newest {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4} ", idx + 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<14}", snapshot.action.as_str()),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
                Span::styled(snapshot.description.clone(), text_style),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
