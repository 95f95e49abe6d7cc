//! Static route-to-destination table.
//!
//! The directions query needs an origin and a destination; a route number
//! alone is not enough. Each known route maps to a fixed terminus and any
//! other route falls back to [`DEFAULT_DESTINATION`].

/// Destination for routes missing from [`DESTINATIONS`].
pub const DEFAULT_DESTINATION: &str = "City Center";

/// Known routes and their destinations.
pub const DESTINATIONS: &[(&str, &str)] = &[
    ("23", "Downtown"),
    ("45", "Airport"),
    ("12", "Railway Station"),
    ("7", "Shopping Mall"),
    ("5", "University"),
];

/// Resolve the destination for a route. Matching is exact.
pub fn destination_for(route_number: &str) -> &'static str {
    DESTINATIONS
        .iter()
        .find(|(route, _)| *route == route_number)
        .map(|(_, destination)| *destination)
        .unwrap_or(DEFAULT_DESTINATION)
}
