//! Info line and status bar with keybindings and run state

use crate::sieve::RunState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the info line and status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub limit: usize,
    pub prime_count: usize,
    pub steps_taken: usize,
    pub state: RunState,
    pub speed: u8,
    pub interval_ms: u128,
    pub recording: bool,
}

/// Text of the info line
pub fn info_line(message: &str, limit: usize, prime_count: usize) -> String {
    format!("{message}    |   N={limit}   |   primes found so far: {prime_count}")
}

/// Render the one-line info bar above the status bar
pub fn render_info_line(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", info_line(data.message, data.limit, data.prime_count)),
        Style::default()
            .fg(DEFAULT_THEME.fg)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let state_bg = match data.state {
        RunState::Idle => DEFAULT_THEME.success,
        RunState::Running => DEFAULT_THEME.secondary,
        RunState::Paused => DEFAULT_THEME.primary,
        RunState::Done => DEFAULT_THEME.error,
    };

    let mut left_spans = vec![
        Span::styled(
            format!(" Step {} ", data.steps_taken),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" speed {} ({} ms) ", data.speed, data.interval_ms),
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];
    if data.recording {
        left_spans.push(Span::styled(
            " ● REC ",
            Style::default()
                .bg(DEFAULT_THEME.status_bg)
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.status_bg)
        .fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" → ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" reset ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" N ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" +/- ", key_style),
        Span::styled(" speed ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" {} ", data.state.label()),
            Style::default()
                .bg(state_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.status_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_line_format() {
        assert_eq!(
            info_line("Paused.", 100, 7),
            "Paused.    |   N=100   |   primes found so far: 7"
        );
    }
}
