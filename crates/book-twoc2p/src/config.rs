//! # 2C2P Configuration
//!
//! Merchant credentials and the hosted-payment endpoint. All optional:
//! without credentials the strategy can only run its insecure format-check
//! fallback, and redirect URLs cannot be built at all.

use std::env;

/// 2C2P merchant configuration
#[derive(Debug, Clone)]
pub struct TwoC2PConfig {
    /// Merchant id issued by 2C2P
    pub merchant_id: Option<String>,

    /// Shared secret used to sign payment requests
    pub secret_key: Option<String>,

    /// Hosted payment page endpoint. Never defaulted, so no build can
    /// silently redirect customers to the live gateway.
    pub api_url: Option<String>,

    /// Whether the credentials-missing fallback may accept payments.
    /// Derived from `ENVIRONMENT`: false when `production`.
    pub allow_insecure_fallback: bool,
}

impl TwoC2PConfig {
    /// Load configuration from environment variables.
    ///
    /// Env vars (all optional): `TWOC2P_MERCHANT_ID`, `TWOC2P_SECRET_KEY`,
    /// `TWOC2P_API_URL`, plus `ENVIRONMENT` for the fallback switch.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self {
            merchant_id: non_empty(env::var("TWOC2P_MERCHANT_ID").ok()),
            secret_key: non_empty(env::var("TWOC2P_SECRET_KEY").ok()),
            api_url: non_empty(env::var("TWOC2P_API_URL").ok()),
            allow_insecure_fallback: environment != "production",
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        merchant_id: impl Into<String>,
        secret_key: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: Some(merchant_id.into()),
            secret_key: Some(secret_key.into()),
            api_url: Some(api_url.into()),
            allow_insecure_fallback: true,
        }
    }

    /// Config with no credentials, fallback only (for testing)
    pub fn without_credentials() -> Self {
        Self {
            merchant_id: None,
            secret_key: None,
            api_url: None,
            allow_insecure_fallback: true,
        }
    }

    /// Builder: toggle the insecure fallback (off for production)
    pub fn with_insecure_fallback(mut self, allow: bool) -> Self {
        self.allow_insecure_fallback = allow;
        self
    }

    /// Both merchant id and secret are present
    pub fn has_credentials(&self) -> bool {
        self.merchant_id.is_some() && self.secret_key.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
