//! # Engine Configuration
//!
//! One immutable configuration value for the whole pipeline, assembled from
//! environment variables at startup and passed into the engine at
//! construction time. No component reads the environment on its own after
//! this point.

use book_core::error::PaymentResult;
use book_paypal::PayPalConfig;
use book_stripe::StripeConfig;
use book_twoc2p::TwoC2PConfig;

/// Aggregate provider configuration for the booking engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deployment environment (development, staging, production)
    pub environment: String,

    pub paypal: PayPalConfig,
    pub stripe: StripeConfig,
    pub twoc2p: TwoC2PConfig,
}

impl EngineConfig {
    /// Load the full configuration from environment variables.
    ///
    /// PayPal credentials are required, since that adapter has no fallback.
    /// Stripe and 2C2P credentials are optional; without them those adapters
    /// degrade to their flagged-insecure fallbacks (and refuse to accept at
    /// all when `ENVIRONMENT=production`).
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok();

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            environment,
            paypal: PayPalConfig::from_env()?,
            stripe: StripeConfig::from_env()?,
            twoc2p: TwoC2PConfig::from_env(),
        })
    }

    /// Assemble a config from already-built provider configs (for tests and
    /// embedders that do not use the environment)
    pub fn new(paypal: PayPalConfig, stripe: StripeConfig, twoc2p: TwoC2PConfig) -> Self {
        Self {
            environment: "development".to_string(),
            paypal,
            stripe,
            twoc2p,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
