//! Outbound collaborator seams.
//!
//! The webhook flow talks to the directions and SMS providers through these
//! traits so it can be exercised without network access.

use async_trait::async_trait;

use crate::maps::{EtaResult, MapsClient};
use crate::sms::{SendResult, SmsClient};

/// Source of bus ETAs.
#[async_trait]
pub trait EtaLookup: Send + Sync {
    /// Look up the next bus on `route_number` from `origin`. Never fails;
    /// failures are reported inside the result.
    async fn get_bus_eta(&self, origin: &str, route_number: &str) -> EtaResult;
}

/// Outbound SMS channel.
#[async_trait]
pub trait SmsDelivery: Send + Sync {
    /// Send `message` to `phone_number`. Never fails; failures are reported
    /// inside the result.
    async fn send_sms(&self, phone_number: &str, message: &str) -> SendResult;
}

#[async_trait]
impl EtaLookup for MapsClient {
    async fn get_bus_eta(&self, origin: &str, route_number: &str) -> EtaResult {
        MapsClient::get_bus_eta(self, origin, route_number).await
    }
}

#[async_trait]
impl SmsDelivery for SmsClient {
    async fn send_sms(&self, phone_number: &str, message: &str) -> SendResult {
        SmsClient::send_sms(self, phone_number, message).await
    }
}
