//! Process configuration.
//!
//! Read once at startup and passed by value to the components that need it.
//! Nothing reads the environment after [`AppConfig::from_env`] returns.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::maps::MapsConfig;
use crate::sms::SmsConfig;

/// Default bind host.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
const DEFAULT_PORT: u16 = 5000;

/// Log filter used when `RUST_LOG` is unset and `APP_ENV` names no mode.
pub const DEFAULT_LOG_FILTER: &str = "info,bus_eta_server=debug,tower_http=debug";

/// Environment variables that must be present and non-empty.
const REQUIRED_VARS: [&str; 3] = ["GOOGLE_MAPS_API_KEY", "FAST2SMS_API_KEY", "SECRET_KEY"];

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more required variables are absent or empty.
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    /// `PORT` is not a valid port number.
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    /// `HOST` is not an IP address.
    #[error("invalid HOST value: {0}")]
    InvalidHost(String),
}

/// Deployment environment, from `APP_ENV`. Selects the default log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Production,
    #[default]
    Unspecified,
}

impl Environment {
    fn parse(s: &str) -> Self {
        match s {
            "development" => Environment::Development,
            "production" => Environment::Production,
            _ => Environment::Unspecified,
        }
    }
}

/// Immutable application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Google Maps Directions API key
    pub maps_api_key: String,
    /// Fast2SMS API key
    pub sms_api_key: String,
    /// Service secret
    pub secret_key: String,
    /// Directions endpoint override
    pub maps_base_url: Option<String>,
    /// SMS endpoint override
    pub sms_base_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|&&key| get(key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host_raw = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_raw.clone()))?;

        Ok(Self {
            maps_api_key: get("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            sms_api_key: get("FAST2SMS_API_KEY").unwrap_or_default(),
            secret_key: get("SECRET_KEY").unwrap_or_default(),
            maps_base_url: get("GOOGLE_MAPS_BASE_URL"),
            sms_base_url: get("FAST2SMS_BASE_URL"),
            host,
            port,
            environment: get("APP_ENV")
                .map(|v| Environment::parse(v.trim()))
                .unwrap_or_default(),
        })
    }

    /// Socket address to bind the HTTP server to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log filter to apply when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "debug,hyper=info,reqwest=info",
            Environment::Production => "info",
            Environment::Unspecified => DEFAULT_LOG_FILTER,
        }
    }

    /// Directions client configuration.
    pub fn maps_config(&self) -> MapsConfig {
        let config = MapsConfig::new(&self.maps_api_key);
        match &self.maps_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    /// SMS client configuration.
    pub fn sms_config(&self) -> SmsConfig {
        let config = SmsConfig::new(&self.sms_api_key);
        match &self.sms_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("maps_api_key", &"<redacted>")
            .field("sms_api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("maps_base_url", &self.maps_base_url)
            .field("sms_base_url", &self.sms_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .finish()
    }
}
