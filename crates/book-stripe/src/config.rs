//! # Stripe Configuration
//!
//! Configuration for PaymentIntent verification. The secret key is optional:
//! without one the strategy can only run its insecure format-check fallback,
//! which is refused entirely in production configurations.

use book_core::error::{PaymentError, PaymentResult};
use std::env;
use std::time::Duration;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...); `None` leaves only the
    /// insecure fallback path
    pub secret_key: Option<String>,

    /// API base URL; required whenever a key is configured. Never defaulted,
    /// so no build can silently point at the live API.
    pub api_base_url: Option<String>,

    /// Whether the credentials-missing fallback may accept payments.
    /// Derived from `ENVIRONMENT`: false when `production`.
    pub allow_insecure_fallback: bool,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Overall request timeout
    pub request_timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Env vars:
    /// - `STRIPE_SECRET_KEY` (optional; `sk_`-prefix validated when present)
    /// - `STRIPE_API_URL` (required when a key is set)
    /// - `ENVIRONMENT` (fallback disabled when `production`)
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("STRIPE_SECRET_KEY").ok().filter(|k| !k.trim().is_empty());

        if let Some(ref key) = secret_key {
            if !key.starts_with("sk_test_") && !key.starts_with("sk_live_") {
                return Err(PaymentError::Configuration(
                    "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
                ));
            }
        }

        let api_base_url = env::var("STRIPE_API_URL").ok().filter(|u| !u.trim().is_empty());
        if secret_key.is_some() && api_base_url.is_none() {
            return Err(PaymentError::Configuration(
                "STRIPE_API_URL not set".to_string(),
            ));
        }

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            secret_key,
            api_base_url,
            allow_insecure_fallback: environment != "production",
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            api_base_url: Some(api_base_url.into()),
            allow_insecure_fallback: true,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Config with no key at all, fallback only (for testing)
    pub fn without_key() -> Self {
        Self {
            secret_key: None,
            api_base_url: None,
            allow_insecure_fallback: true,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Builder: toggle the insecure fallback (off for production)
    pub fn with_insecure_fallback(mut self, allow: bool) -> Self {
        self.allow_insecure_fallback = allow;
        self
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|k| k.starts_with("sk_test_"))
    }

    /// Authorization header value, when a key is configured
    pub fn auth_header(&self) -> Option<String> {
        self.secret_key.as_deref().map(|k| format!("Bearer {k}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = StripeConfig::new("sk_test_abc123", "https://api.stripe.test");
        assert!(config.is_test_mode());
        assert_eq!(config.auth_header().unwrap(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_keyless_config_has_no_auth() {
        let config = StripeConfig::without_key();
        assert!(config.auth_header().is_none());
        assert!(config.allow_insecure_fallback);
    }

    #[test]
    fn test_fallback_toggle() {
        let config = StripeConfig::without_key().with_insecure_fallback(false);
        assert!(!config.allow_insecure_fallback);
    }
}
