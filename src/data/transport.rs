//! HTTP transport used by the weather client
//!
//! The client only needs "GET a URL, hand back the status and body". Keeping that
//! behind a trait lets tests script responses without a network.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, Url};

use super::WeatherError;

/// User agent sent with every request
const USER_AGENT: &str = concat!("skyview/", env!("CARGO_PKG_VERSION"));

/// Status and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests
pub trait HttpTransport: Send + Sync {
    /// Fetches `url`. Non-2xx statuses are returned as responses, not errors;
    /// only connection-level failures are errors.
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<HttpResponse, WeatherError>>;
}

/// Transport backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<HttpResponse, WeatherError>> {
        Box::pin(async move {
            // reqwest errors carry the URL, and the URL carries the API key
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(reqwest::Error::without_url)?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)?;
            Ok(HttpResponse { status, body })
        })
    }
}
