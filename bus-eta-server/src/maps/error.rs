//! Directions client error types.
//!
//! The `Display` text of each variant is what ends up in
//! [`EtaResult::error`](super::EtaResult). It is logged, never sent to users.

/// Errors from the Google Maps Directions client.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// Non-2xx HTTP status
    #[error("Google Maps API error: {status}")]
    Status { status: u16 },

    /// Top-level `status` field was not `OK`
    #[error("Google Maps API status: {0}")]
    ApiStatus(String),

    /// `routes` was empty
    #[error("No routes found")]
    NoRoutes,

    /// First route had no legs
    #[error("No route legs found")]
    NoLegs,

    /// Request exceeded the configured timeout
    #[error("Request to Google Maps API timed out")]
    Timeout,

    /// Transport-level failure (DNS, connection refused, TLS, ...)
    #[error("Google Maps API request error: {0}")]
    Http(reqwest::Error),

    /// Client cannot be built from its configuration
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Anything else, including a body that is not valid directions JSON
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for MapsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MapsError::Timeout
        } else {
            MapsError::Http(err)
        }
    }
}
