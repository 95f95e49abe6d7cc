//! Fast2SMS HTTP client.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::error::SmsError;
use super::types::{BulkSmsRequest, SendResult, is_accepted, provider_message};

/// Default bulk-send endpoint.
const DEFAULT_BASE_URL: &str = "https://www.fast2sms.com/dev/bulkV2";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Attempts made by [`SmsClient::send_sms_with_retry`] unless told otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for the SMS client.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// API key, sent in the `authorization` header
    pub api_key: String,
    /// Endpoint URL (defaults to production Fast2SMS)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Backoff unit for retries; attempt `n` waits `retry_base * 2^n`
    pub retry_base: Duration,
}

impl SmsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_base: Duration::from_secs(1),
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry backoff unit.
    pub fn with_retry_base(mut self, base: Duration) -> Self {
        self.retry_base = base;
        self
    }
}

/// Fast2SMS API client.
#[derive(Debug, Clone)]
pub struct SmsClient {
    http: reqwest::Client,
    base_url: String,
    retry_base: Duration,
}

impl SmsClient {
    /// Create a new SMS client with the given configuration.
    pub fn new(config: SmsConfig) -> Result<Self, SmsError> {
        if config.api_key.is_empty() {
            return Err(SmsError::NotConfigured(
                "Fast2SMS API key is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| SmsError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            retry_base: config.retry_base,
        })
    }

    /// Send one message. Never fails: errors become an unsuccessful
    /// [`SendResult`] and are logged.
    pub async fn send_sms(&self, phone_number: &str, message: &str) -> SendResult {
        match self.post_message(phone_number, message).await {
            Ok(body) => SendResult::sent(body),
            Err(e) => {
                error!("SMS send failed: {e}");
                let error = e.to_string();
                SendResult::failed(error, e.into_provider_body())
            }
        }
    }

    /// Send a message, retrying up to `max_attempts` times with exponential
    /// backoff (1, 2, 4, ... backoff units) between attempts.
    pub async fn send_sms_with_retry(
        &self,
        phone_number: &str,
        message: &str,
        max_attempts: u32,
    ) -> SendResult {
        for attempt in 0..max_attempts {
            let result = self.send_sms(phone_number, message).await;
            if result.success {
                return result;
            }

            warn!(
                attempt = attempt + 1,
                max_attempts, "SMS send attempt failed: {}", result.error
            );

            if attempt + 1 < max_attempts {
                let delay = self
                    .retry_base
                    .saturating_mul(2u32.saturating_pow(attempt));
                tokio::time::sleep(delay).await;
            }
        }

        SendResult::failed(
            SmsError::RetriesExhausted {
                attempts: max_attempts,
            }
            .to_string(),
            None,
        )
    }

    async fn post_message(&self, phone_number: &str, message: &str) -> Result<Value, SmsError> {
        debug!(chars = message.chars().count(), "sending SMS");

        let response = self
            .http
            .post(&self.base_url)
            .json(&BulkSmsRequest::text(phone_number, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SmsError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body)
            .map_err(|e| SmsError::Unexpected(format!("invalid Fast2SMS response: {e}")))?;

        if is_accepted(&body) {
            Ok(body)
        } else {
            Err(SmsError::Rejected {
                message: provider_message(&body),
                response: body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client_for(server: &mockito::Server) -> SmsClient {
        let config = SmsConfig::new("sms-key")
            .with_base_url(format!("{}/dev/bulkV2", server.url()))
            .with_retry_base(Duration::from_millis(1));
        SmsClient::new(config).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = SmsConfig::new("sms-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.retry_base, Duration::from_secs(1));
    }

    #[test]
    fn invalid_keys_are_rejected() {
        assert!(SmsClient::new(SmsConfig::new("")).is_err());
        assert!(SmsClient::new(SmsConfig::new("bad\nkey")).is_err());
    }

    #[tokio::test]
    async fn send_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/dev/bulkV2")
            .match_header("authorization", "sms-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "route": "v3",
                "sender_id": "TXTIND",
                "message": "Test message",
                "language": "english",
                "flash": 0,
                "numbers": "1234567890"
            })))
            .with_status(200)
            .with_body(r#"{"return": true, "request_id": "abc", "message": ["SMS sent successfully."]}"#)
            .create_async()
            .await;

        let result = client_for(&server).send_sms("1234567890", "Test message").await;

        assert!(result.success);
        assert!(result.error.is_empty());
        assert_eq!(result.response.unwrap()["return"], json!(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/dev/bulkV2")
            .with_status(400)
            .create_async()
            .await;

        let result = client_for(&server).send_sms("1234567890", "Test message").await;

        assert!(!result.success);
        assert_eq!(result.error, "Fast2SMS API error: 400");
        assert!(result.response.is_none());
    }

    #[tokio::test]
    async fn provider_rejects_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/dev/bulkV2")
            .with_status(200)
            .with_body(r#"{"return": false, "status_code": 411, "message": "Invalid Numbers"}"#)
            .create_async()
            .await;

        let result = client_for(&server).send_sms("12", "Test message").await;

        assert!(!result.success);
        assert_eq!(result.error, "Fast2SMS API error: Invalid Numbers");
        assert_eq!(result.response.unwrap()["status_code"], json!(411));
    }

    #[tokio::test]
    async fn non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/dev/bulkV2")
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let result = client_for(&server).send_sms("1234567890", "Test message").await;

        assert!(!result.success);
        assert!(result.error.starts_with("Unexpected error:"));
    }

    #[tokio::test]
    async fn connection_refused() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let config = SmsConfig::new("sms-key").with_base_url(format!("http://{addr}/dev/bulkV2"));
        let client = SmsClient::new(config).unwrap();

        let result = client.send_sms("1234567890", "Test message").await;

        assert!(!result.success);
        assert!(result.error.starts_with("Fast2SMS API request error:"));
    }

    /// Accepts connections and never answers them.
    async fn silent_server() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn request_times_out() {
        let addr = silent_server().await;
        let config = SmsConfig::new("sms-key")
            .with_base_url(format!("http://{addr}/dev/bulkV2"))
            .with_timeout(1);
        let client = SmsClient::new(config).unwrap();

        let result = client.send_sms("1234567890", "Test message").await;

        assert!(!result.success);
        assert_eq!(result.error, "Request to Fast2SMS API timed out");
        assert!(result.response.is_none());
    }

    #[tokio::test]
    async fn retry_recovers_after_failures() {
        let mut server = mockito::Server::new_async().await;
        let failing = server
            .mock("POST", "/dev/bulkV2")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;
        let succeeding = server
            .mock("POST", "/dev/bulkV2")
            .with_status(200)
            .with_body(r#"{"return": true}"#)
            .expect(1)
            .create_async()
            .await;

        let result = client_for(&server)
            .send_sms_with_retry("1234567890", "Test message", DEFAULT_MAX_ATTEMPTS)
            .await;

        assert!(result.success);
        failing.assert_async().await;
        succeeding.assert_async().await;
    }

    #[tokio::test]
    async fn retry_stops_at_first_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/dev/bulkV2")
            .with_status(200)
            .with_body(r#"{"return": true}"#)
            .expect(1)
            .create_async()
            .await;

        let result = client_for(&server)
            .send_sms_with_retry("1234567890", "Test message", 5)
            .await;

        assert!(result.success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn retry_gives_up_after_max_attempts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/dev/bulkV2")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let result = client_for(&server)
            .send_sms_with_retry("1234567890", "Test message", 3)
            .await;

        assert!(!result.success);
        assert_eq!(result.error, "Failed to send SMS after 3 attempts");
        assert!(result.response.is_none());
        mock.assert_async().await;
    }
}
