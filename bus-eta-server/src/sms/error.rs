//! SMS client error types.

/// Errors from the Fast2SMS client.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// Non-2xx HTTP status
    #[error("Fast2SMS API error: {status}")]
    Status { status: u16 },

    /// 2xx response whose `return` flag was not true
    #[error("Fast2SMS API error: {message}")]
    Rejected {
        message: String,
        response: serde_json::Value,
    },

    /// Request exceeded the configured timeout
    #[error("Request to Fast2SMS API timed out")]
    Timeout,

    /// Transport-level failure
    #[error("Fast2SMS API request error: {0}")]
    Http(reqwest::Error),

    /// Every attempt of a retried send failed
    #[error("Failed to send SMS after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// Client cannot be built from its configuration
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Anything else, including a body that is not JSON
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SmsError {
    /// Provider response body, when one was received and decoded.
    pub fn into_provider_body(self) -> Option<serde_json::Value> {
        match self {
            SmsError::Rejected { response, .. } => Some(response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SmsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SmsError::Timeout
        } else {
            SmsError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SmsError::Status { status: 401 }.to_string(),
            "Fast2SMS API error: 401"
        );
        let err = SmsError::Rejected {
            message: "Invalid Numbers".into(),
            response: serde_json::json!({"return": false}),
        };
        assert_eq!(err.to_string(), "Fast2SMS API error: Invalid Numbers");
        assert_eq!(
            err.into_provider_body(),
            Some(serde_json::json!({"return": false}))
        );
        assert_eq!(
            SmsError::Timeout.to_string(),
            "Request to Fast2SMS API timed out"
        );
        assert_eq!(
            SmsError::RetriesExhausted { attempts: 3 }.to_string(),
            "Failed to send SMS after 3 attempts"
        );
    }
}
