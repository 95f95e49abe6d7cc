//! SMS reply formatting.

use std::panic;

use tracing::error;

use crate::maps::{EtaResult, UNKNOWN};
use crate::parser::PROCESSING_ERROR_MESSAGE;

/// Longest message that fits in one SMS segment.
pub const SMS_MAX_CHARS: usize = 160;

/// Marker appended to truncated messages.
const ELLIPSIS: &str = "...";

/// Reply when the provider could not find the route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found. Check route number and try again.";

/// Reply for every other lookup failure.
pub const UNABLE_TO_FETCH_MESSAGE: &str = "Unable to fetch ETA. Please try again later.";

/// Render a lookup result as a single-segment SMS.
///
/// The result never exceeds [`SMS_MAX_CHARS`] characters. Failed lookups map
/// to one of two fixed messages; the provider's error text is never echoed.
pub fn format_eta_response(eta: &EtaResult, route: &str, location: &str) -> String {
    panic::catch_unwind(|| render(eta, route, location)).unwrap_or_else(|_| {
        error!(route, "panic while formatting ETA response");
        PROCESSING_ERROR_MESSAGE.to_string()
    })
}

fn render(eta: &EtaResult, route: &str, location: &str) -> String {
    let data = match &eta.data {
        Some(data) if eta.success => data,
        _ => {
            return if eta.error.to_lowercase().contains("not found") {
                ROUTE_NOT_FOUND_MESSAGE.to_string()
            } else {
                UNABLE_TO_FETCH_MESSAGE.to_string()
            };
        }
    };

    let message = format!(
        "Route {route} from {location}: Next bus in {} at {}. Next: {}",
        or_unknown(&data.eta_text),
        or_unknown(&data.departure_time),
        or_unknown(&data.next_time),
    );

    truncate_sms(message)
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}

/// Cut a message down to one SMS segment, counting characters rather than
/// bytes so multi-byte text is never split mid-character.
fn truncate_sms(message: String) -> String {
    if message.chars().count() <= SMS_MAX_CHARS {
        return message;
    }
    let keep = SMS_MAX_CHARS - ELLIPSIS.len();
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
