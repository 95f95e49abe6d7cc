//! Data transfer objects for web requests and responses.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::maps::EtaResult;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Successful webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: &'static str,
    pub phone_number: String,
    pub location: String,
    pub route: String,
    /// The raw lookup result, not the SMS text.
    pub eta_data: EtaResult,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Sender and text pulled from an inbound webhook payload.
///
/// Gateways disagree on field names, so each field has a fallback:
/// `from`/`sender` and `message`/`text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundSms {
    pub phone_number: String,
    pub message_text: String,
}

impl InboundSms {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            phone_number: field_text(payload, "from", "sender"),
            message_text: field_text(payload, "message", "text"),
        }
    }

    /// Both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.phone_number.is_empty() && !self.message_text.is_empty()
    }
}

/// Text of `primary`, or of `fallback` when `primary` is absent or null.
/// Numbers are rendered as decimal text; other types read as empty.
fn field_text(payload: &Map<String, Value>, primary: &str, fallback: &str) -> String {
    let value = match payload.get(primary) {
        // An explicit null falls back like a missing key.
        None | Some(Value::Null) => payload.get(fallback),
        present => present,
    };
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
