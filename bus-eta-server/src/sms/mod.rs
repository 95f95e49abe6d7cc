//! Fast2SMS delivery client.
//!
//! Sends single-recipient English texts through the bulk API's quick route.
//! [`SmsClient::send_sms_with_retry`] adds bounded exponential backoff for
//! callers that want it; the webhook flow sends once.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_MAX_ATTEMPTS, SmsClient, SmsConfig};
pub use error::SmsError;
pub use types::{BulkSmsRequest, SendResult};
