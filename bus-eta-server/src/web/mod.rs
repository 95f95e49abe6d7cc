//! Web layer for the bus ETA gateway.
//!
//! Provides the inbound SMS webhook and a health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
