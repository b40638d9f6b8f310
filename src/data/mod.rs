//! Core data models for skyview
//!
//! This module contains the data types used throughout the application for
//! representing location queries, current conditions, and forecast entries.

pub mod demo;
pub mod forecast;
pub mod icons;
pub mod transport;
pub mod weather;

pub use forecast::{aggregate_forecast, aggregate_forecast_in, MAX_FORECAST_DAYS};
pub use icons::{lookup_icon_class, WeatherIcon};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use weather::{Endpoint, WeatherClient, WeatherError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, -90 to 90
    pub latitude: f64,
    /// Longitude, -180 to 180
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and within range
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// What the user asked for: a place name or a coordinate pair
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name, resolved through the geocoding endpoint
    City(String),
    /// Coordinates supplied directly (the geolocation path)
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates(Coordinates::new(latitude, longitude))
    }

    /// Short label for log lines and the status bar
    pub fn label(&self) -> String {
        match self {
            Self::City(name) => name.trim().to_string(),
            Self::Coordinates(c) => format!("{:.4}, {:.4}", c.latitude, c.longitude),
        }
    }
}

/// Current weather snapshot for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Name shown as the heading
    pub location_name: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Visibility in meters, if the station reports it
    pub visibility_m: Option<u32>,
    /// Short description, e.g. "partly cloudy"
    pub description: String,
    /// Icon code from the service vocabulary, e.g. "02d"
    pub icon: String,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

/// One timestamped sample from the multi-day forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Seconds since the Unix epoch
    pub dt: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Short description
    pub description: String,
    /// Icon code
    pub icon: String,
}

impl ForecastEntry {
    /// Timestamp as a UTC datetime, or `None` if `dt` is out of range
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

/// Current conditions plus one forecast entry per day, always produced together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// At most [`MAX_FORECAST_DAYS`] entries, one per calendar date
    pub daily: Vec<ForecastEntry>,
}
