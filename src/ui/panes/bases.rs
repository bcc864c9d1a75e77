//! Base prime pane: composites struck first by each base

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the base prime pane
pub fn render_bases_pane(
    frame: &mut Frame,
    area: Rect,
    strikes: &[(usize, usize)],
    current_p: usize,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Base Primes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if strikes.is_empty() {
        let paragraph = Paragraph::new("(no base yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = strikes
        .iter()
        .map(|&(base, count)| {
            let is_current = base == current_p;
            let base_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.primary)
            };
            let marker = if is_current { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, base_style),
                Span::styled(format!("p = {base:<4}"), base_style),
                Span::styled(
                    format!(" struck {count}"),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ]))
        })
        .collect();

    // Keep the newest base visible
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
