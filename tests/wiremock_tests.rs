//! Integration tests for the weather client using wiremock
//!
//! These tests run the full resolve/fetch/aggregate chain against a mock
//! OpenWeatherMap server.

use std::sync::Arc;
use std::time::Duration;

use skyview::data::{
    Endpoint, LocationQuery, ReqwestTransport, WeatherClient, WeatherError, MAX_FORECAST_DAYS,
};
use skyview::display::CurrentView;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "test-key";

/// 2024-01-15 12:00:00 UTC
const FIRST_DT: i64 = 1_705_320_000;

fn client_for(server: &MockServer) -> WeatherClient {
    let transport =
        ReqwestTransport::new(Duration::from_secs(5)).expect("Failed to build transport");
    WeatherClient::new(API_KEY, Arc::new(transport))
        .with_geocoding_base(format!("{}/geo/1.0", server.uri()))
        .with_weather_base(format!("{}/data/2.5", server.uri()))
}

fn geocoding_response() -> serde_json::Value {
    serde_json::json!([
        {"name": "London", "lat": 51.5074, "lon": -0.1278, "country": "GB"}
    ])
}

fn current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1278, "lat": 51.5074},
        "weather": [{"id": 802, "main": "Clouds", "description": "partly cloudy", "icon": "02d"}],
        "main": {"temp": 22.0, "feels_like": 24.0, "humidity": 65, "pressure": 1013},
        "visibility": 10000,
        "wind": {"speed": 3.5, "deg": 240},
        "name": "City of London"
    })
}

/// Six days of entries, one every 24 hours
fn forecast_response() -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..6)
        .map(|day| {
            serde_json::json!({
                "dt": FIRST_DT + day * 86_400,
                "main": {"temp": 15.0 + day as f64},
                "weather": [{"description": format!("day {}", day), "icon": "01d"}]
            })
        })
        .collect();
    serde_json::json!({"cod": "200", "cnt": list.len(), "list": list})
}

async fn mount_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_city_lookup_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "London"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_response()))
        .expect(1)
        .mount(&server)
        .await;
    mount_weather(&server).await;

    let report = client_for(&server)
        .lookup(&LocationQuery::city(" London "))
        .await
        .expect("Lookup should succeed");

    // City queries show the user's text
    assert_eq!(report.current.location_name, "London");
    assert!((report.current.temperature - 22.0).abs() < 0.01);
    assert_eq!(report.current.visibility_m, Some(10_000));

    let view = CurrentView::new(&report.current);
    assert_eq!(view.temperature, "22");
    assert_eq!(view.humidity, "65%");
    assert_eq!(view.visibility, "10 km");

    assert_eq!(report.daily.len(), MAX_FORECAST_DAYS);
    assert_eq!(report.daily[0].dt, FIRST_DT);
    assert!(report.daily.windows(2).all(|w| w[0].dt < w[1].dt));
}

#[tokio::test]
async fn test_coordinate_lookup_skips_geocoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_response()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
        .mount(&server)
        .await;

    let report = client_for(&server)
        .lookup(&LocationQuery::coordinates(51.5, -0.13))
        .await
        .expect("Lookup should succeed");

    // Coordinate queries show the service's name
    assert_eq!(report.current.location_name, "City of London");
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    mount_weather(&server).await;

    let result = client_for(&server)
        .lookup(&LocationQuery::city("Nowhereville"))
        .await;

    match result {
        Err(WeatherError::NotFound(city)) => assert_eq!(city, "Nowhereville"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "No weather request after a failed geocode");
}

#[tokio::test]
async fn test_geocoding_error_status_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup(&LocationQuery::city("London"))
        .await;
    assert!(matches!(result, Err(WeatherError::NotFound(_))));
}

#[tokio::test]
async fn test_server_error_on_forecast_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup(&LocationQuery::coordinates(51.5, -0.13))
        .await;

    match result {
        Err(WeatherError::Transport { endpoint, status }) => {
            assert_eq!(endpoint, Endpoint::Forecast);
            assert_eq!(status, 500);
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .lookup(&LocationQuery::coordinates(51.5, -0.13))
        .await;

    match result {
        Err(e @ WeatherError::Parse { .. }) => assert!(e.is_parse_error()),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_request_failed_without_key() {
    // Bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind")
        .local_addr()
        .expect("No local address")
        .port();

    let transport =
        ReqwestTransport::new(Duration::from_secs(5)).expect("Failed to build transport");
    let client = WeatherClient::new("SECRET-KEY-123", Arc::new(transport))
        .with_weather_base(format!("http://127.0.0.1:{}/data/2.5", port));

    let result = client.lookup(&LocationQuery::coordinates(51.5, -0.13)).await;
    match result {
        Err(e @ WeatherError::RequestFailed(_)) => {
            let message = e.to_string();
            assert!(!message.contains("SECRET-KEY-123"), "{}", message);
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
}
