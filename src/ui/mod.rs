//! UI rendering module for skyview
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod search_bar;
pub mod weather_view;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, QueryState};

/// Shared color scheme
pub(crate) mod colors {
    use ratatui::style::Color;

    /// Borders and section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Placeholders and hints
    pub const UNKNOWN: Color = Color::DarkGray;
    /// Error banner
    pub const ERROR: Color = Color::Red;
    /// Key names in help text
    pub const KEY: Color = Color::Yellow;
}

/// Renders the whole screen for the current app state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    search_bar::render(frame, chunks[0], app);
    search_bar::render_status(frame, chunks[1], app);

    match &app.report {
        Some(report) => weather_view::render(frame, chunks[2], report),
        None => render_placeholder(frame, chunks[2], app),
    }

    render_footer(frame, chunks[3]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Body text when there is no report to show
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let text = match app.query_state {
        QueryState::Idle => "Type a city name and press Enter",
        _ => "",
    };
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(colors::UNKNOWN)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(colors::KEY)),
        Span::raw(" search  "),
        Span::styled("Ctrl-L", Style::default().fg(colors::KEY)),
        Span::raw(" home  "),
        Span::styled("F5", Style::default().fg(colors::KEY)),
        Span::raw(" refresh  "),
        Span::styled("F1", Style::default().fg(colors::KEY)),
        Span::raw(" help  "),
        Span::styled("Esc", Style::default().fg(colors::KEY)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(colors::SECONDARY)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_report;
    use crate::data::LocationQuery;
    use crate::query::LookupMessage;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_idle_screen_shows_prompt_and_footer() {
        let content = screen(&App::new(None));
        assert!(content.contains("Type a city name and press Enter"));
        assert!(content.contains("refresh"));
    }

    #[test]
    fn test_report_screen() {
        let mut app = App::new(None);
        let generation = app.submit(LocationQuery::city("London"));
        app.apply(LookupMessage::Finished {
            generation,
            outcome: Ok(demo_report("London", Utc::now())),
        });

        let content = screen(&app);
        assert!(content.contains("London"));
        assert!(content.contains("1013 hPa"));
        assert!(content.contains("Updated"));
        assert!(!content.contains("Type a city name"));
    }

    #[test]
    fn test_help_overlay_drawn_on_top() {
        let mut app = App::new(None);
        app.show_help = true;
        let content = screen(&app);
        assert!(content.contains("Keyboard Shortcuts"));
    }
}
