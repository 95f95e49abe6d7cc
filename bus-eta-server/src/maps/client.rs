//! Google Maps Directions HTTP client.
//!
//! Asks for a bus-only transit route from the user's location to the
//! route's destination, departing now, and reads the ETA off the first leg.

use std::time::Duration;

use tracing::{debug, error};

use super::destinations::destination_for;
use super::error::MapsError;
use super::eta::{EtaData, EtaResult, eta_from_response};
use super::types::DirectionsResponse;

/// Default Directions API endpoint.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to production Google Maps)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        if config.api_key.is_empty() {
            return Err(MapsError::NotConfigured(
                "Google Maps API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Look up the next bus on `route_number` from `origin`.
    ///
    /// Never fails: every error is folded into an unsuccessful [`EtaResult`]
    /// and logged.
    pub async fn get_bus_eta(&self, origin: &str, route_number: &str) -> EtaResult {
        let result = self.fetch_eta(origin, route_number).await;
        if let Err(e) = &result {
            error!(route = route_number, "ETA lookup failed: {e}");
        }
        EtaResult::from(result)
    }

    async fn fetch_eta(&self, origin: &str, route_number: &str) -> Result<EtaData, MapsError> {
        let destination = destination_for(route_number);
        debug!(origin, destination, route = route_number, "querying directions");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "transit"),
                ("transit_mode", "bus"),
                ("departure_time", "now"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapsError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let directions: DirectionsResponse = serde_json::from_str(&body)
            .map_err(|e| MapsError::Unexpected(format!("invalid directions response: {e}")))?;

        if let Some(message) = &directions.error_message {
            debug!(status = ?directions.status, "directions API message: {message}");
        }

        eta_from_response(&directions, origin, destination, route_number)
    }
}
