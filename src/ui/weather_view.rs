//! Weather report screen
//!
//! Renders the current-conditions panel above a row of daily forecast cards.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::data::WeatherReport;
use crate::display::{round_temperature, CurrentView, ForecastCard};

use super::colors;

/// Height of the current-conditions panel including borders
const CURRENT_PANEL_HEIGHT: u16 = 11;

/// Renders the report into `area`
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `area` - Region below the search bar
/// * `report` - The report to show
pub fn render(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CURRENT_PANEL_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    render_current(frame, chunks[0], report);
    render_forecast(frame, chunks[1], report);
}

fn render_current(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let view = CurrentView::new(&report.current);
    let temp_color = temperature_color(report.current.temperature);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {} ", view.location),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            view.date.clone(),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{}  ", view.icon.glyph())),
            Span::styled(
                format!("{}°C", view.temperature),
                Style::default().fg(temp_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(view.description.clone(), Style::default().fg(colors::PRIMARY)),
        ]),
        Line::from(""),
        detail_line("Feels like", format!("{}°C", view.feels_like)),
        detail_line("Visibility", view.visibility.clone()),
        detail_line("Humidity", view.humidity.clone()),
        detail_line("Wind", view.wind.clone()),
        detail_line("Pressure", view.pressure.clone()),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", format!("{}:", label)),
            Style::default().fg(colors::SECONDARY),
        ),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}

fn render_forecast(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    if report.daily.is_empty() || area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {}-Day Forecast ", report.daily.len()),
            Style::default()
                .fg(colors::HEADER)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = report.daily.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(inner);

    for (entry, column) in report.daily.iter().zip(columns.iter()) {
        let card = ForecastCard::new(entry);
        render_card(frame, *column, &card, temperature_color(entry.temperature));
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &ForecastCard, temp_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SECONDARY))
        .title(Span::styled(
            card.date.clone(),
            Style::default().fg(colors::PRIMARY),
        ))
        .title_alignment(Alignment::Center);

    let lines = vec![
        Line::from(card.icon.glyph()),
        Line::from(Span::styled(
            card.temperature.clone(),
            Style::default().fg(temp_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.description.clone(),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Color for a temperature in °C, by the displayed (rounded) value
fn temperature_color(celsius: f64) -> Color {
    match round_temperature(celsius) {
        t if t >= 30 => Color::Red,
        t if t >= 25 => Color::LightRed,
        t if t >= 20 => Color::Yellow,
        t if t >= 15 => Color::Green,
        t if t >= 5 => Color::Cyan,
        _ => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_report;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(report: &WeatherReport, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), report))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_current_panel_renders_all_fields() {
        let report = demo_report("London", Utc::now());
        let content = render_to_string(&report, 100, 24);

        assert!(content.contains("London"));
        assert!(content.contains("22°C"));
        assert!(content.contains("partly cloudy"));
        assert!(content.contains("24°C"));
        assert!(content.contains("10 km"));
        assert!(content.contains("65%"));
        assert!(content.contains("3.5 m/s"));
        assert!(content.contains("1013 hPa"));
    }

    #[test]
    fn test_forecast_cards_render() {
        let report = demo_report("London", Utc::now());
        let content = render_to_string(&report, 100, 24);

        assert!(content.contains("5-Day Forecast"));
        assert!(content.contains("20°C"));
        assert!(content.contains("18°C"));
        assert!(content.contains("25°C"));
    }

    #[test]
    fn test_empty_forecast_hides_section() {
        let mut report = demo_report("London", Utc::now());
        report.daily.clear();
        let content = render_to_string(&report, 100, 24);
        assert!(!content.contains("Forecast"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let report = demo_report("London", Utc::now());
        render_to_string(&report, 20, 5);
    }

    #[test]
    fn test_temperature_color_bands() {
        assert_eq!(temperature_color(31.0), Color::Red);
        assert_eq!(temperature_color(22.0), Color::Yellow);
        assert_eq!(temperature_color(19.5), Color::Yellow);
        assert_eq!(temperature_color(-4.0), Color::Blue);
    }
}
