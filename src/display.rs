//! Display formatting for weather reports
//!
//! Turns a [`WeatherReport`] into the strings the widget shows: rounded
//! temperatures, units, and long/short dates. Shared by the terminal UI and the
//! one-shot text output.

use std::fmt::{Display, Write};

use chrono::{DateTime, Local, TimeZone};

use crate::data::{
    lookup_icon_class, CurrentConditions, ForecastEntry, WeatherIcon, WeatherReport,
};

/// Rounds half up, so 21.5 shows as 22 and -2.5 as -2
pub fn round_temperature(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

pub fn format_temperature(celsius: f64) -> String {
    round_temperature(celsius).to_string()
}

pub fn format_humidity(humidity: u8) -> String {
    format!("{}%", humidity)
}

/// Meters to kilometers, e.g. 10000 -> "10 km", 9500 -> "9.5 km"
pub fn format_visibility(visibility_m: Option<u32>) -> String {
    match visibility_m {
        Some(meters) => format!("{} km", f64::from(meters) / 1000.0),
        None => "--".to_string(),
    }
}

pub fn format_wind(speed_ms: f64) -> String {
    format!("{} m/s", speed_ms)
}

pub fn format_pressure(hpa: u32) -> String {
    format!("{} hPa", hpa)
}

/// e.g. "Saturday, October 17, 2026"
pub fn format_long_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%A, %B %-d, %Y").to_string()
}

/// e.g. "Sat, Oct 17"
pub fn format_short_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%a, %b %-d").to_string()
}

/// Display strings for the current-conditions panel
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub visibility: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub icon: WeatherIcon,
}

impl CurrentView {
    /// Formats with dates in the local time zone
    pub fn new(current: &CurrentConditions) -> Self {
        Self::in_time_zone(current, &Local)
    }

    pub fn in_time_zone<Tz: TimeZone>(current: &CurrentConditions, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        Self {
            location: current.location_name.clone(),
            date: format_long_date(&current.fetched_at.with_timezone(tz)),
            temperature: format_temperature(current.temperature),
            description: current.description.clone(),
            feels_like: format_temperature(current.feels_like),
            visibility: format_visibility(current.visibility_m),
            humidity: format_humidity(current.humidity),
            wind: format_wind(current.wind_speed),
            pressure: format_pressure(current.pressure),
            icon: lookup_icon_class(&current.icon),
        }
    }
}

/// Display strings for one forecast card
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: String,
    /// Rounded temperature with unit, e.g. "20°C"
    pub temperature: String,
    pub description: String,
    pub icon: WeatherIcon,
}

impl ForecastCard {
    pub fn new(entry: &ForecastEntry) -> Self {
        Self::in_time_zone(entry, &Local)
    }

    pub fn in_time_zone<Tz: TimeZone>(entry: &ForecastEntry, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        let date = entry
            .time()
            .map(|t| format_short_date(&t.with_timezone(tz)))
            .unwrap_or_default();
        Self {
            date,
            temperature: format!("{}°C", format_temperature(entry.temperature)),
            description: entry.description.clone(),
            icon: lookup_icon_class(&entry.icon),
        }
    }
}

/// Plain-text report for one-shot output
pub fn render_text(report: &WeatherReport) -> String {
    render_text_in(report, &Local)
}

pub fn render_text_in<Tz: TimeZone>(report: &WeatherReport, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let view = CurrentView::in_time_zone(&report.current, tz);
    let mut output = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(output, "{}", view.location);
    let _ = writeln!(output, "{}", view.date);
    let _ = writeln!(
        output,
        "\n  {} {}°C  {}",
        view.icon.glyph(),
        view.temperature,
        view.description
    );
    let _ = writeln!(output, "  Feels like: {}°C", view.feels_like);
    let _ = writeln!(output, "  Visibility: {}", view.visibility);
    let _ = writeln!(output, "  Humidity:   {}", view.humidity);
    let _ = writeln!(output, "  Wind:       {}", view.wind);
    let _ = writeln!(output, "  Pressure:   {}", view.pressure);

    if !report.daily.is_empty() {
        let _ = writeln!(output, "\n{}-Day Forecast:", report.daily.len());
        for entry in &report.daily {
            let card = ForecastCard::in_time_zone(entry, tz);
            let _ = writeln!(
                output,
                "  {:<12} {} {:>6}  {}",
                card.date,
                card.icon.glyph(),
                card.temperature,
                card.description
            );
        }
    }

    output
}
