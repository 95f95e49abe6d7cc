//! ETA lookup results and conversion from directions responses.

use serde::Serialize;

use super::error::MapsError;
use super::types::DirectionsResponse;

/// Departure text used when the leg has none.
const DEPARTURE_NOW: &str = "Now";

/// Placeholder for values the directions API cannot provide.
pub const UNKNOWN: &str = "Unknown";

/// Point-in-time arrival data from one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtaData {
    /// Leg duration in whole minutes (seconds / 60, rounded down).
    pub eta_minutes: i64,
    pub eta_text: String,
    pub departure_time: String,
    pub origin: String,
    pub destination: String,
    pub route_number: String,
    pub next_departure: String,
    /// Always the origin text; the API does not name the boarding stop here.
    pub bus_stop_name: String,
    /// Always [`UNKNOWN`]; the API does not expose a second departure.
    pub next_time: String,
}

/// Outcome of one ETA lookup.
///
/// `success` is true exactly when `data` is present and `error` is empty.
/// Build it with [`EtaResult::found`] or [`EtaResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtaResult {
    pub success: bool,
    pub error: String,
    pub data: Option<EtaData>,
}

impl EtaResult {
    pub fn found(data: EtaData) -> Self {
        Self {
            success: true,
            error: String::new(),
            data: Some(data),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            success: false,
            error: if error.is_empty() {
                "Unknown error".to_string()
            } else {
                error
            },
            data: None,
        }
    }
}

impl From<Result<EtaData, MapsError>> for EtaResult {
    fn from(result: Result<EtaData, MapsError>) -> Self {
        match result {
            Ok(data) => EtaResult::found(data),
            Err(e) => EtaResult::failed(e.to_string()),
        }
    }
}

/// Extract ETA data from the first leg of the first route.
pub fn eta_from_response(
    response: &DirectionsResponse,
    origin: &str,
    destination: &str,
    route_number: &str,
) -> Result<EtaData, MapsError> {
    match response.status.as_deref() {
        Some("OK") => {}
        Some(other) => return Err(MapsError::ApiStatus(other.to_string())),
        None => return Err(MapsError::ApiStatus("missing".to_string())),
    }

    let route = response.routes.first().ok_or(MapsError::NoRoutes)?;
    let leg = route.legs.first().ok_or(MapsError::NoLegs)?;

    let duration = leg.duration.as_ref();
    let eta_minutes = duration
        .and_then(|d| d.value)
        .unwrap_or(0)
        .div_euclid(60);
    let eta_text = duration
        .and_then(|d| d.text.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let departure_time = leg
        .departure_time
        .as_ref()
        .and_then(|t| t.text.clone())
        .unwrap_or_else(|| DEPARTURE_NOW.to_string());

    Ok(EtaData {
        eta_minutes,
        eta_text,
        next_departure: departure_time.clone(),
        departure_time,
        origin: origin.to_string(),
        destination: destination.to_string(),
        route_number: route_number.to_string(),
        bus_stop_name: origin.to_string(),
        next_time: UNKNOWN.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> DirectionsResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn converts_first_leg() {
        let resp = response(serde_json::json!({
            "status": "OK",
            "routes": [{
                "legs": [
                    {"duration": {"value": 779, "text": "13 mins"}, "departure_time": {"text": "2:30 PM"}},
                    {"duration": {"value": 60, "text": "1 min"}}
                ]
            }]
        }));

        let data = eta_from_response(&resp, "MG Road", "Downtown", "23").unwrap();
        assert_eq!(data.eta_minutes, 12);
        assert_eq!(data.eta_text, "13 mins");
        assert_eq!(data.departure_time, "2:30 PM");
        assert_eq!(data.next_departure, "2:30 PM");
        assert_eq!(data.origin, "MG Road");
        assert_eq!(data.destination, "Downtown");
        assert_eq!(data.route_number, "23");
        assert_eq!(data.bus_stop_name, "MG Road");
        assert_eq!(data.next_time, UNKNOWN);
    }

    #[test]
    fn missing_leg_fields_use_defaults() {
        let resp = response(serde_json::json!({"status": "OK", "routes": [{"legs": [{}]}]}));

        let data = eta_from_response(&resp, "A", "B", "1").unwrap();
        assert_eq!(data.eta_minutes, 0);
        assert_eq!(data.eta_text, UNKNOWN);
        assert_eq!(data.departure_time, "Now");
    }

    #[test]
    fn non_ok_status() {
        let resp = response(serde_json::json!({"status": "ZERO_RESULTS", "routes": []}));
        let err = eta_from_response(&resp, "A", "B", "1").unwrap_err();
        assert!(matches!(err, MapsError::ApiStatus(ref s) if s == "ZERO_RESULTS"));

        let resp = response(serde_json::json!({"routes": []}));
        let err = eta_from_response(&resp, "A", "B", "1").unwrap_err();
        assert!(matches!(err, MapsError::ApiStatus(_)));
    }

    #[test]
    fn empty_routes_and_legs() {
        let resp = response(serde_json::json!({"status": "OK", "routes": []}));
        assert!(matches!(
            eta_from_response(&resp, "A", "B", "1"),
            Err(MapsError::NoRoutes)
        ));

        let resp = response(serde_json::json!({"status": "OK", "routes": [{"legs": []}]}));
        assert!(matches!(
            eta_from_response(&resp, "A", "B", "1"),
            Err(MapsError::NoLegs)
        ));
    }

    #[test]
    fn result_invariants() {
        let failed = EtaResult::from(Err::<EtaData, _>(MapsError::NoRoutes));
        assert!(!failed.success);
        assert!(failed.data.is_none());
        assert_eq!(failed.error, "No routes found");

        assert!(!EtaResult::failed("").error.is_empty());
    }
}
