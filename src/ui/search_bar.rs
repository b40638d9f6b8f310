//! Search bar and status line

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, QueryState};

use super::colors;

/// Renders the city input box and places the terminal cursor at its end
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " skyview ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    let content = if app.input.is_empty() && !app.show_help {
        Line::from(Span::styled(
            "Enter a city name...",
            Style::default().fg(colors::UNKNOWN),
        ))
    } else {
        Line::from(Span::raw(app.input.clone()))
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if !app.show_help && inner.width > 0 && inner.height > 0 {
        let offset = (app.input.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + offset, inner.y));
    }
}

/// Renders the one-line status: loading indicator, error banner, or last update time
pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.query_state {
        QueryState::Idle => Line::from(""),
        QueryState::Resolving => Line::from(Span::styled(
            " Finding location...",
            Style::default().fg(colors::HEADER),
        )),
        QueryState::Fetching => Line::from(Span::styled(
            " Loading weather...",
            Style::default().fg(colors::HEADER),
        )),
        QueryState::Failed(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default()
                .fg(colors::ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        QueryState::Succeeded => match app.last_refresh {
            Some(time) => Line::from(Span::styled(
                format!(" Updated {}", time.format("%H:%M")),
                Style::default().fg(colors::SECONDARY),
            )),
            None => Line::from(""),
        },
    };

    frame.render_widget(Paragraph::new(line), area);
}
