//! Fast2SMS request and response types.

use serde::Serialize;
use serde_json::Value;

/// Fast2SMS "Quick SMS" route.
pub const ROUTE_QUICK: &str = "v3";

/// Default sender ID for the quick route.
pub const DEFAULT_SENDER_ID: &str = "TXTIND";

/// Body of a bulk send request.
#[derive(Debug, Clone, Serialize)]
pub struct BulkSmsRequest<'a> {
    pub route: &'a str,
    pub sender_id: &'a str,
    pub message: &'a str,
    pub language: &'a str,
    /// 1 for a flash SMS shown without being stored
    pub flash: u8,
    /// Comma-separated recipients
    pub numbers: &'a str,
}

impl<'a> BulkSmsRequest<'a> {
    /// A plain English text to a single recipient.
    pub fn text(numbers: &'a str, message: &'a str) -> Self {
        Self {
            route: ROUTE_QUICK,
            sender_id: DEFAULT_SENDER_ID,
            message,
            language: "english",
            flash: 0,
            numbers,
        }
    }
}

/// Outcome of one send.
///
/// `response` carries the provider's decoded body when one was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendResult {
    pub success: bool,
    pub error: String,
    pub response: Option<Value>,
}

impl SendResult {
    pub fn sent(response: Value) -> Self {
        Self {
            success: true,
            error: String::new(),
            response: Some(response),
        }
    }

    pub fn failed(error: impl Into<String>, response: Option<Value>) -> Self {
        Self {
            success: false,
            error: error.into(),
            response,
        }
    }
}

/// Whether the provider accepted the message (`"return": true`).
pub fn is_accepted(body: &Value) -> bool {
    body.get("return").and_then(Value::as_bool) == Some(true)
}

/// The provider's `message` field, which may be a string or a list of strings.
pub fn provider_message(body: &Value) -> String {
    match body.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                "Unknown error".to_string()
            } else {
                parts.join("; ")
            }
        }
        _ => "Unknown error".to_string(),
    }
}
