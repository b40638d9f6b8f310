//! Synthetic report for `--demo`
//!
//! Lets the widget run without an API key or network. Never used as a fallback
//! for a failed lookup.

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone, Utc};

use super::forecast::aggregate_forecast_in;
use super::{CurrentConditions, ForecastEntry, WeatherReport};

const SECONDS_PER_DAY: i64 = 86_400;

/// Local time of day for demo forecast entries
const DEMO_HOUR: u32 = 12;

/// (temperature, description, icon) for each demo forecast day
const DEMO_DAYS: [(f64, &str, &str); 5] = [
    (20.0, "sunny", "01d"),
    (18.0, "cloudy", "04d"),
    (25.0, "clear sky", "01d"),
    (19.0, "light rain", "10d"),
    (23.0, "partly cloudy", "02d"),
];

/// Builds the demo report for `location_name`, with forecast days following `now`
/// in the local time zone
pub fn demo_report(location_name: &str, now: DateTime<Utc>) -> WeatherReport {
    demo_report_in(location_name, now, &Local)
}

/// Builds the demo report with one forecast entry at noon on each of the five
/// calendar days after `now` in `tz`
pub fn demo_report_in<Tz: TimeZone>(
    location_name: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> WeatherReport {
    let current = CurrentConditions {
        location_name: location_name.to_string(),
        temperature: 22.0,
        feels_like: 24.0,
        humidity: 65,
        pressure: 1013,
        wind_speed: 3.5,
        visibility_m: Some(10_000),
        description: "partly cloudy".to_string(),
        icon: "02d".to_string(),
        fetched_at: now,
    };

    let today = now.with_timezone(tz).date_naive();
    let noon = NaiveTime::from_hms_opt(DEMO_HOUR, 0, 0).unwrap_or_default();

    let entries: Vec<ForecastEntry> = DEMO_DAYS
        .iter()
        .enumerate()
        .map(|(i, (temperature, description, icon))| {
            let offset = i as u64 + 1;
            let dt = today
                .checked_add_days(Days::new(offset))
                .and_then(|date| tz.from_local_datetime(&date.and_time(noon)).earliest())
                .map(|time| time.timestamp())
                .unwrap_or_else(|| now.timestamp() + offset as i64 * SECONDS_PER_DAY);
            ForecastEntry {
                dt,
                temperature: *temperature,
                description: description.to_string(),
                icon: icon.to_string(),
            }
        })
        .collect();

    WeatherReport {
        current,
        daily: aggregate_forecast_in(&entries, tz),
    }
}
