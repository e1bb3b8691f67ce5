//! # PayPal Payment Verification
//!
//! Direct verification of a PayPal order id handed over by the frontend
//! checkout. The strategy authenticates, fetches the order, and accepts only
//! when both the order and its capture are in a payable state.
//!
//! Locally fabricated "fallback" transaction ids, produced by upstream code
//! paths when no real payment ever happened, are rejected before any network
//! call. They must never be treated as proof of payment.

use crate::api::{PayPalApi, PAYABLE_CAPTURE_STATUSES, PAYABLE_ORDER_STATUSES};
use crate::config::PayPalConfig;
use async_trait::async_trait;
use book_core::booking::{PaymentMethod, PaymentPayload, ProviderReference};
use book_core::error::{PaymentError, PaymentResult};
use book_core::outcome::PaymentOutcome;
use book_core::strategy::PaymentStrategy;
use tracing::{info, instrument, warn};

/// Transaction-id prefixes fabricated by legacy fallback paths.
/// Anything carrying one of these never touched PayPal.
pub const SYNTHETIC_PREFIXES: [&str; 2] = ["PAYPAL_FALLBACK_", "CARD_PAYPAL_"];

/// Capture `status_details.reason` values that signal a dispute in progress
const DISPUTE_REASONS: [&str; 2] = ["BUYER_COMPLAINT", "CHARGEBACK"];

/// PayPal order-verification strategy
pub struct PayPalStrategy {
    api: PayPalApi,
}

impl PayPalStrategy {
    /// Create a new strategy from explicit config
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            api: PayPalApi::new(config),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Ok(Self::new(PayPalConfig::from_env()?))
    }

    /// Whether a transaction id was fabricated locally instead of by PayPal
    pub fn is_synthetic(transaction_id: &str) -> bool {
        SYNTHETIC_PREFIXES
            .iter()
            .any(|prefix| transaction_id.starts_with(prefix))
    }

    /// Authenticate, fetch the order, and check order + capture state
    async fn check_order(&self, order_id: &str) -> PaymentResult<()> {
        let token = self.api.access_token().await?;
        let order = self.api.fetch_order(&token, order_id).await?;

        if !PAYABLE_ORDER_STATUSES.contains(&order.status.as_str()) {
            return Err(PaymentError::Rejected {
                provider: "paypal",
                reason: format!("order status is {}", order.status),
            });
        }

        let capture = order.first_capture().ok_or(PaymentError::Rejected {
            provider: "paypal",
            reason: "no captures found on the order".to_string(),
        })?;

        if !PAYABLE_CAPTURE_STATUSES.contains(&capture.status.as_str()) {
            return Err(PaymentError::Rejected {
                provider: "paypal",
                reason: format!("capture status is {}", capture.status),
            });
        }

        if let Some(reason) = capture
            .status_details
            .as_ref()
            .and_then(|details| details.reason.as_deref())
        {
            if DISPUTE_REASONS.contains(&reason) {
                return Err(PaymentError::Rejected {
                    provider: "paypal",
                    reason: format!("capture is disputed: {reason}"),
                });
            }
        }

        info!(order_id, capture_id = %capture.id, "PayPal payment verified");
        Ok(())
    }
}

#[async_trait]
impl PaymentStrategy for PayPalStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    #[instrument(skip(self, payload))]
    async fn verify_payment(&self, payload: &PaymentPayload) -> PaymentOutcome {
        let PaymentPayload::PayPal(info) = payload else {
            return PaymentOutcome::rejected(format!(
                "paypal strategy received a {} payload",
                payload.method()
            ));
        };

        let transaction_id = info.transaction_id.trim();
        if transaction_id.is_empty() {
            return PaymentOutcome::rejected("missing PayPal transaction id");
        }
        if info.email.trim().is_empty() {
            return PaymentOutcome::rejected("missing PayPal account email");
        }

        if Self::is_synthetic(transaction_id) {
            warn!(transaction_id, "rejecting synthetic PayPal transaction id");
            return PaymentOutcome::rejected(format!(
                "transaction id {transaction_id} was fabricated locally and is not proof of payment"
            ));
        }

        match self.check_order(transaction_id).await {
            Ok(()) => PaymentOutcome::accepted(ProviderReference::PayPal {
                email: info.email.trim().to_string(),
                transaction_id: transaction_id.to_string(),
            }),
            Err(err) => {
                warn!(transaction_id, error = %err, "PayPal verification failed");
                err.into()
            }
        }
    }
}
