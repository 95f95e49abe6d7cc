//! Application state for the web layer.

use std::sync::Arc;

use crate::providers::{EtaLookup, SmsDelivery};

/// Shared application state.
///
/// Holds the outbound clients. Both are read-only after startup, so
/// concurrent requests share them without locking.
#[derive(Clone)]
pub struct AppState {
    /// ETA lookup (Google Maps in production)
    pub maps: Arc<dyn EtaLookup>,

    /// SMS delivery (Fast2SMS in production)
    pub sms: Arc<dyn SmsDelivery>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(maps: Arc<dyn EtaLookup>, sms: Arc<dyn SmsDelivery>) -> Self {
        Self { maps, sms }
    }
}
