//! HTTP route handlers.
//!
//! The webhook runs one inbound SMS through parse, lookup, format and
//! delivery in order. The first failing stage decides both the SMS the user
//! gets and the HTTP status the gateway sees; later stages are skipped.

use std::any::Any;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::format::{UNABLE_TO_FETCH_MESSAGE, format_eta_response};
use crate::parser::{INVALID_FORMAT_MESSAGE, parse_sms_input};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Inbound SMS webhook.
async fn webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, AppError> {
    // Decode by hand so an empty or malformed body is a 400 rather than
    // axum's extractor rejection.
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) if !map.is_empty() => map,
        _ => {
            error!("no JSON data received in webhook");
            return Err(AppError::BadRequest {
                message: "No data received".to_string(),
            });
        }
    };

    process_inbound(&state, &payload).await.map(Json)
}

async fn process_inbound(
    state: &AppState,
    payload: &Map<String, Value>,
) -> Result<WebhookResponse, AppError> {
    let inbound = InboundSms::from_payload(payload);

    if !inbound.is_complete() {
        error!("missing phone number or message text in webhook data");
        // Sent even when the phone number is the missing field; the provider
        // then rejects it and the failure is only logged.
        notify(state, &inbound.phone_number, INVALID_FORMAT_MESSAGE).await;
        return Err(AppError::BadRequest {
            message: "Missing phone number or message".to_string(),
        });
    }

    let phone_number = inbound.phone_number;

    let parsed = parse_sms_input(&inbound.message_text);
    if !parsed.valid {
        error!("invalid SMS format: {}", parsed.error);
        notify(state, &phone_number, &parsed.error).await;
        return Err(AppError::BadRequest {
            message: parsed.error,
        });
    }

    let eta = state.maps.get_bus_eta(&parsed.location, &parsed.route).await;
    if !eta.success {
        error!(route = %parsed.route, "failed to get ETA: {}", eta.error);
        notify(state, &phone_number, UNABLE_TO_FETCH_MESSAGE).await;
        return Err(AppError::Internal {
            message: "Failed to get ETA".to_string(),
        });
    }

    let reply = format_eta_response(&eta, &parsed.route, &parsed.location);

    let sent = state.sms.send_sms(&phone_number, &reply).await;
    if !sent.success {
        error!("failed to send SMS: {}", sent.error);
        return Err(AppError::Internal {
            message: "Failed to send response SMS".to_string(),
        });
    }

    info!(
        route = %parsed.route,
        location = %parsed.location,
        "ETA reply sent"
    );

    Ok(WebhookResponse {
        message: "SMS processed successfully",
        phone_number,
        location: parsed.location,
        route: parsed.route,
        eta_data: eta,
    })
}

/// Best-effort error notice to the sender.
async fn notify(state: &AppState, phone_number: &str, message: &str) {
    let result = state.sms.send_sms(phone_number, message).await;
    if !result.success {
        warn!("could not deliver error notice: {}", result.error);
    }
}

/// Last-resort handler for panics anywhere in request handling.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("unexpected error in webhook: {detail}");

    AppError::Internal {
        message: "Internal server error".to_string(),
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
