//! # Stripe PaymentIntent Verification
//!
//! The frontend confirms a PaymentIntent client-side and hands us its id;
//! this strategy retrieves the intent server-side and accepts only status
//! `succeeded`.
//!
//! Without a secret key the strategy degrades to a `pi_`-shape check. That
//! path accepts payments WITHOUT server-side validation. It exists for
//! local development only, is logged at warn on every use, and is refused
//! outright when the fallback is disabled (production).

use crate::config::StripeConfig;
use async_trait::async_trait;
use book_core::booking::{PaymentMethod, PaymentPayload, ProviderReference, StripeInfo};
use book_core::error::{PaymentError, PaymentResult};
use book_core::outcome::PaymentOutcome;
use book_core::strategy::PaymentStrategy;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

const PROVIDER: &str = "stripe";

/// Stripe PaymentIntent strategy
pub struct StripeStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeStrategy {
    /// Create a new strategy from explicit config
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Ok(Self::new(StripeConfig::from_env()?))
    }

    /// Retrieve the PaymentIntent and check its status
    async fn check_intent(&self, payment_intent_id: &str) -> PaymentResult<()> {
        let (auth, base_url) = match (self.config.auth_header(), &self.config.api_base_url) {
            (Some(auth), Some(base_url)) => (auth, base_url),
            _ => {
                return Err(PaymentError::Configuration(
                    "stripe secret key not configured".to_string(),
                ))
            }
        };

        let url = format!("{base_url}/v1/payment_intents/{payment_intent_id}");
        let response = self
            .client
            .get(&url)
            .header("Authorization", auth)
            .send()
            .await
            .map_err(|e| PaymentError::Unavailable {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PaymentError::Unavailable {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        if !status.is_success() {
            error!(%status, payment_intent_id, "Stripe intent lookup failed");
            if let Ok(err) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::Provider {
                    provider: PROVIDER,
                    message: err.error.message,
                });
            }
            return Err(PaymentError::Provider {
                provider: PROVIDER,
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let intent: PaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {e}"))
        })?;

        if intent.status != "succeeded" {
            return Err(PaymentError::Rejected {
                provider: PROVIDER,
                reason: format!("payment intent status is {}", intent.status),
            });
        }

        info!(payment_intent_id, "Stripe payment verified");
        Ok(())
    }

    /// Shape check used when no key is configured. Insecure by definition.
    fn fallback_outcome(&self, info: &StripeInfo) -> PaymentOutcome {
        if !self.config.allow_insecure_fallback {
            error!("stripe key missing and insecure fallback is disabled");
            return PaymentOutcome::rejected(
                "stripe secret key not configured and fallback validation is disabled",
            );
        }

        let id = info.payment_intent_id.trim();
        if id.starts_with("pi_") && id.len() > 3 {
            warn!(
                payment_intent_id = id,
                "accepting Stripe payment WITHOUT server-side validation; \
                 configure STRIPE_SECRET_KEY before going live"
            );
            PaymentOutcome::accepted_insecure(reference(info))
        } else {
            PaymentOutcome::rejected(format!("payment intent id has an invalid format: {id}"))
        }
    }
}

#[async_trait]
impl PaymentStrategy for StripeStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Stripe
    }

    #[instrument(skip(self, payload))]
    async fn verify_payment(&self, payload: &PaymentPayload) -> PaymentOutcome {
        let PaymentPayload::Stripe(info) = payload else {
            return PaymentOutcome::rejected(format!(
                "stripe strategy received a {} payload",
                payload.method()
            ));
        };

        if info.payment_intent_id.trim().is_empty() {
            return PaymentOutcome::rejected("missing Stripe payment intent id");
        }

        if self.config.secret_key.is_none() {
            return self.fallback_outcome(info);
        }

        match self.check_intent(info.payment_intent_id.trim()).await {
            Ok(()) => PaymentOutcome::accepted(reference(info)),
            Err(err) => {
                warn!(payment_intent_id = %info.payment_intent_id, error = %err, "Stripe verification failed");
                err.into()
            }
        }
    }
}

fn reference(info: &StripeInfo) -> ProviderReference {
    ProviderReference::Stripe {
        payment_intent_id: info.payment_intent_id.trim().to_string(),
        customer_email: info.customer_email.clone(),
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
