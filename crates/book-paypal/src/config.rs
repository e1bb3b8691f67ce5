//! # PayPal Configuration
//!
//! Credentials and endpoint for the PayPal Orders API. Everything is loaded
//! from environment variables; there is no default base URL, so a deployment
//! must say explicitly whether it talks to the sandbox or the live API.

use book_core::error::{PaymentError, PaymentResult};
use std::env;
use std::time::Duration;

/// PayPal REST API configuration
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// OAuth2 client id
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: String,

    /// API base URL (e.g. `https://api-m.sandbox.paypal.com`)
    pub api_base_url: String,

    /// TCP connect timeout for every call
    pub connect_timeout: Duration,

    /// Overall request timeout for every call
    pub request_timeout: Duration,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    /// - `PAYPAL_BASE_URL`
    ///
    /// Unlike the other providers there is no credentials-missing fallback:
    /// a PayPal booking can only be accepted after the Orders API confirmed
    /// the payment.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let client_id = require_env("PAYPAL_CLIENT_ID")?;
        let client_secret = require_env("PAYPAL_CLIENT_SECRET")?;
        let api_base_url = require_env("PAYPAL_BASE_URL")?;

        Ok(Self::new(client_id, client_secret, api_base_url))
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base_url: api_base_url.into(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: override the call timeouts
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

fn require_env(key: &'static str) -> PaymentResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PaymentError::Configuration(format!("{key} not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = PayPalConfig::new("client", "secret", "https://api-m.sandbox.paypal.com");

        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.api_base_url, "https://api-m.sandbox.paypal.com");
    }

    #[test]
    fn test_base_url_builder() {
        let config =
            PayPalConfig::new("client", "secret", "unused").with_api_base_url("http://127.0.0.1:9");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn test_from_env_missing_credentials() {
        env::remove_var("PAYPAL_CLIENT_ID");

        let result = PayPalConfig::from_env();
        assert!(result.is_err());
    }
}
