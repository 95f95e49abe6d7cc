//! Directions API response DTOs.
//!
//! Only the fields the ETA lookup reads are modelled. Everything is
//! optional or defaulted because the API omits fields rather than sending
//! nulls, and a missing field must not fail the whole decode.

use serde::Deserialize;

/// Top-level Directions API response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `NOT_FOUND`, `REQUEST_DENIED`, ...
    pub status: Option<String>,

    /// Present alongside non-`OK` statuses.
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// One leg of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLeg {
    /// Travel time; `value` in seconds.
    pub duration: Option<TextValue>,

    /// Only present for transit requests.
    pub departure_time: Option<TransitTime>,
}

/// A numeric value paired with its display text.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: Option<i64>,
    pub text: Option<String>,
}

/// A transit timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitTime {
    /// Local time for display, e.g. `2:30 PM`.
    pub text: Option<String>,
}
