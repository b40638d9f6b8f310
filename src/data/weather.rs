//! OpenWeatherMap client
//!
//! This module resolves place names to coordinates through the geocoding API,
//! fetches current conditions and the 5-day/3-hour forecast, and turns the
//! responses into a [`WeatherReport`].

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::forecast::aggregate_forecast;
use super::transport::HttpTransport;
use super::{Coordinates, CurrentConditions, ForecastEntry, LocationQuery, WeatherReport};

/// Base URL for the OpenWeatherMap geocoding API
pub const DEFAULT_GEOCODING_BASE: &str = "https://api.openweathermap.org/geo/1.0";

/// Base URL for the OpenWeatherMap weather API
pub const DEFAULT_WEATHER_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// The three remote endpoints the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Current,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Geocoding => "geocoding",
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while looking up weather
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The query was rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Geocoding returned no match for the place name
    #[error("City not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status
    #[error("Failed to fetch {endpoint} data (HTTP {status})")]
    Transport { endpoint: Endpoint, status: u16 },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: Endpoint,
        source: serde_json::Error,
    },

    /// Missing expected field in response
    #[error("Missing expected field in {endpoint} response: {field}")]
    MissingField {
        endpoint: Endpoint,
        field: &'static str,
    },

    /// A request URL could not be built from the configured base
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl WeatherError {
    /// True for errors caused by a malformed or incomplete response body
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::MissingField { .. })
    }
}

/// Client for the OpenWeatherMap geocoding and weather APIs
#[derive(Clone)]
pub struct WeatherClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    geocoding_base: String,
    weather_base: String,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("api_key", &"<redacted>")
            .field("geocoding_base", &self.geocoding_base)
            .field("weather_base", &self.weather_base)
            .finish_non_exhaustive()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient against the public OpenWeatherMap endpoints
    pub fn new(api_key: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            geocoding_base: DEFAULT_GEOCODING_BASE.to_string(),
            weather_base: DEFAULT_WEATHER_BASE.to_string(),
        }
    }

    /// Override the geocoding base URL
    pub fn with_geocoding_base(mut self, base: impl Into<String>) -> Self {
        self.geocoding_base = base.into();
        self
    }

    /// Override the weather base URL
    pub fn with_weather_base(mut self, base: impl Into<String>) -> Self {
        self.weather_base = base.into();
        self
    }

    /// Runs the whole lookup for a query: resolve, fetch, aggregate.
    pub async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let coordinates = self.coordinates_for(query).await?;
        self.fetch_report(query, coordinates).await
    }

    /// Returns the coordinates for a query, geocoding city names.
    ///
    /// Coordinate queries are validated and returned without a request.
    pub async fn coordinates_for(
        &self,
        query: &LocationQuery,
    ) -> Result<Coordinates, WeatherError> {
        match query {
            LocationQuery::City(name) => self.resolve_coordinates(name).await,
            LocationQuery::Coordinates(coordinates) => {
                validate_coordinates(coordinates)?;
                Ok(*coordinates)
            }
        }
    }

    /// Fetches weather for resolved coordinates and builds the report for `query`.
    ///
    /// City queries keep the user's text as the display name; coordinate queries
    /// use the name the service reports.
    pub async fn fetch_report(
        &self,
        query: &LocationQuery,
        coordinates: Coordinates,
    ) -> Result<WeatherReport, WeatherError> {
        let (mut current, entries) = self
            .fetch_current_and_forecast(coordinates.latitude, coordinates.longitude)
            .await?;

        if let LocationQuery::City(name) = query {
            current.location_name = name.trim().to_string();
        }

        let daily = aggregate_forecast(&entries);
        tracing::debug!(
            entries = entries.len(),
            days = daily.len(),
            "Aggregated forecast"
        );

        Ok(WeatherReport { current, daily })
    }

    /// Resolves a place name to coordinates using the geocoding API
    ///
    /// # Arguments
    /// * `city_name` - Free-text place name; surrounding whitespace is ignored
    ///
    /// # Returns
    /// * `Ok(Coordinates)` - Coordinates of the best match
    /// * `Err(WeatherError::Validation)` - If the name is empty (no request is made)
    /// * `Err(WeatherError::NotFound)` - If there is no match or the request is refused
    pub async fn resolve_coordinates(&self, city_name: &str) -> Result<Coordinates, WeatherError> {
        let city = city_name.trim();
        if city.is_empty() {
            return Err(WeatherError::Validation(
                "Please enter a city name".to_string(),
            ));
        }

        let url = self.url(
            &self.geocoding_base,
            "direct",
            &[("q", city.to_string()), ("limit", "1".to_string())],
        )?;

        tracing::debug!(city, path = url.path(), "Fetching geocoding data");
        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            tracing::warn!(city, status = response.status, "Geocoding request refused");
            return Err(WeatherError::NotFound(city.to_string()));
        }

        let matches: Vec<GeocodingMatch> =
            serde_json::from_str(&response.body).map_err(|source| WeatherError::Parse {
                endpoint: Endpoint::Geocoding,
                source,
            })?;

        let first = matches
            .first()
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

        tracing::debug!(city, lat = first.lat, lon = first.lon, "Resolved coordinates");
        Ok(Coordinates::new(first.lat, first.lon))
    }

    /// Fetches current conditions and the raw 3-hourly forecast
    ///
    /// The two requests are independent but issued one after the other.
    ///
    /// # Arguments
    /// * `latitude` - Latitude coordinate
    /// * `longitude` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok((CurrentConditions, Vec<ForecastEntry>))` - Both results together
    /// * `Err(WeatherError)` - If either request or either parse fails
    pub async fn fetch_current_and_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(CurrentConditions, Vec<ForecastEntry>), WeatherError> {
        validate_coordinates(&Coordinates::new(latitude, longitude))?;

        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", "metric".to_string()),
        ];

        let current_url = self.url(&self.weather_base, "weather", &params)?;
        tracing::debug!(path = current_url.path(), "Fetching current weather");
        let current: CurrentResponse = self.get_json(Endpoint::Current, &current_url).await?;

        let forecast_url = self.url(&self.weather_base, "forecast", &params)?;
        tracing::debug!(path = forecast_url.path(), "Fetching forecast");
        let forecast: ForecastResponse = self.get_json(Endpoint::Forecast, &forecast_url).await?;

        let current = parse_current(current)?;
        let entries = parse_forecast(forecast)?;

        Ok((current, entries))
    }

    /// Issues a GET and decodes a JSON body, mapping failures to the endpoint
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &Url,
    ) -> Result<T, WeatherError> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            tracing::warn!(%endpoint, status = response.status, "Request failed");
            return Err(WeatherError::Transport {
                endpoint,
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| WeatherError::Parse { endpoint, source })
    }

    /// Builds `{base}/{path}?{params}&appid={key}`
    fn url(&self, base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, WeatherError> {
        let raw = format!("{}/{}", base.trim_end_matches('/'), path);
        let pairs = params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(std::iter::once(("appid", self.api_key.as_str())));
        Url::parse_with_params(&raw, pairs).map_err(|e| WeatherError::InvalidUrl(e.to_string()))
    }
}

fn validate_coordinates(coordinates: &Coordinates) -> Result<(), WeatherError> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(WeatherError::Validation(format!(
            "Invalid coordinates: {}, {}",
            coordinates.latitude, coordinates.longitude
        )))
    }
}

/// Converts the current-conditions response into our model
fn parse_current(response: CurrentResponse) -> Result<CurrentConditions, WeatherError> {
    let summary = response
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherError::MissingField {
            endpoint: Endpoint::Current,
            field: "weather[0]",
        })?;

    Ok(CurrentConditions {
        location_name: response.name,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity.round().clamp(0.0, 100.0) as u8,
        pressure: response.main.pressure.round().max(0.0) as u32,
        wind_speed: response.wind.speed,
        visibility_m: response.visibility,
        description: summary.description,
        icon: summary.icon,
        fetched_at: Utc::now(),
    })
}

/// Converts the forecast response into entries, preserving order
fn parse_forecast(response: ForecastResponse) -> Result<Vec<ForecastEntry>, WeatherError> {
    response
        .list
        .into_iter()
        .map(|item| {
            let summary = item
                .weather
                .into_iter()
                .next()
                .ok_or(WeatherError::MissingField {
                    endpoint: Endpoint::Forecast,
                    field: "list[].weather[0]",
                })?;
            Ok(ForecastEntry {
                dt: item.dt,
                temperature: item.main.temp,
                description: summary.description,
                icon: summary.icon,
            })
        })
        .collect()
}

/// One geocoding match
#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    lat: f64,
    lon: f64,
}

/// Current weather response from `/weather`
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    name: String,
    main: CurrentMain,
    weather: Vec<ConditionSummary>,
    #[serde(default)]
    visibility: Option<u32>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSummary {
    description: String,
    icon: String,
}

/// Forecast response from `/forecast`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    weather: Vec<ConditionSummary>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}
