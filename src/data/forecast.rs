//! Daily forecast aggregation
//!
//! The forecast endpoint returns samples every three hours. The widget shows one
//! card per day, using the first sample seen for each calendar date.

use std::collections::HashSet;

use chrono::{Local, NaiveDate, TimeZone};

use super::ForecastEntry;

/// Maximum number of daily entries kept
pub const MAX_FORECAST_DAYS: usize = 5;

/// Groups forecast entries by calendar date in the local time zone.
///
/// See [`aggregate_forecast_in`].
pub fn aggregate_forecast(entries: &[ForecastEntry]) -> Vec<ForecastEntry> {
    aggregate_forecast_in(entries, &Local)
}

/// Groups forecast entries by calendar date in `tz`.
///
/// Keeps the first entry encountered for each distinct date, in first-seen
/// order, and stops after [`MAX_FORECAST_DAYS`] dates. Entries whose timestamp
/// cannot be represented are skipped.
pub fn aggregate_forecast_in<Tz: TimeZone>(
    entries: &[ForecastEntry],
    tz: &Tz,
) -> Vec<ForecastEntry> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut daily = Vec::with_capacity(MAX_FORECAST_DAYS);

    for entry in entries {
        if daily.len() == MAX_FORECAST_DAYS {
            break;
        }
        let Some(time) = entry.time() else {
            continue;
        };
        let date = time.with_timezone(tz).date_naive();
        if seen.insert(date) {
            daily.push(entry.clone());
        }
    }

    daily
}
