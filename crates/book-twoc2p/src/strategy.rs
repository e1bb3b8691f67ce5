//! # 2C2P Verification and Redirect Construction
//!
//! Two distinct operations live here:
//!
//! - `verify_payment`: a transaction-id sanity check. 2C2P confirms payments
//!   on its hosted page before redirecting back, so the backend only sees
//!   ids that already passed the gateway. But without a merchant-API
//!   inquiry this remains a format check, and running it with no credentials
//!   at all is flagged as the insecure fallback it is.
//! - `build_payment_redirect_url`: constructs and signs the request string
//!   that sends a customer to the hosted payment page. Request construction
//!   only; it never confirms a payment.

use crate::config::TwoC2PConfig;
use async_trait::async_trait;
use base64::prelude::*;
use book_core::booking::{PaymentMethod, PaymentPayload, ProviderReference, TwoC2PInfo};
use book_core::error::{PaymentError, PaymentResult};
use book_core::money::Price;
use book_core::outcome::PaymentOutcome;
use book_core::strategy::PaymentStrategy;
use sha2::{Digest, Sha256};
use tracing::{error, info, instrument, warn};

const PROVIDER: &str = "twoc2p";

/// Minimum plausible length of a 2C2P transaction id
const MIN_TRANSACTION_ID_LEN: usize = 11;

/// 2C2P hosted-payment strategy
pub struct TwoC2PStrategy {
    config: TwoC2PConfig,
}

impl TwoC2PStrategy {
    /// Create a new strategy from explicit config
    pub fn new(config: TwoC2PConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(TwoC2PConfig::from_env())
    }

    fn has_plausible_format(transaction_id: &str) -> bool {
        let id = transaction_id.trim();
        id.len() >= MIN_TRANSACTION_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }

    /// Build the signed redirect URL for the hosted payment page.
    ///
    /// The request string carries merchant id, invoice, description, amount
    /// and currency; its signature is `base64(sha256(data + secret))` so the
    /// gateway can detect tampering.
    pub fn build_payment_redirect_url(
        &self,
        total: &Price,
        description: &str,
        order_id: &str,
    ) -> PaymentResult<String> {
        let (merchant_id, secret_key) = match (&self.config.merchant_id, &self.config.secret_key) {
            (Some(merchant_id), Some(secret_key)) => (merchant_id, secret_key),
            _ => {
                return Err(PaymentError::Configuration(
                    "2C2P credentials not configured".to_string(),
                ))
            }
        };
        let api_url = self.config.api_url.as_ref().ok_or_else(|| {
            PaymentError::Configuration("2C2P payment URL not configured".to_string())
        })?;

        let payment_data = format!(
            "merchantID={}&invoiceNo={}&description={}&amount={}&currencyCode={}&paymentChannel=ALL",
            merchant_id,
            order_id,
            description,
            total.as_provider_value(),
            total.currency.code(),
        );

        let signature = sign(&payment_data, secret_key);
        let encoded_data = BASE64_STANDARD.encode(payment_data.as_bytes());

        info!(order_id, "built 2C2P payment redirect");
        Ok(format!(
            "{api_url}?paymentRequest={encoded_data}&signature={signature}"
        ))
    }
}

#[async_trait]
impl PaymentStrategy for TwoC2PStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::TwoC2P
    }

    #[instrument(skip(self, payload))]
    async fn verify_payment(&self, payload: &PaymentPayload) -> PaymentOutcome {
        let PaymentPayload::TwoC2P(info) = payload else {
            return PaymentOutcome::rejected(format!(
                "2c2p strategy received a {} payload",
                payload.method()
            ));
        };

        let transaction_id = info.transaction_id.trim();
        if !Self::has_plausible_format(transaction_id) {
            return PaymentOutcome::rejected(format!(
                "transaction id has an invalid format: {transaction_id}"
            ));
        }

        if self.config.has_credentials() {
            // TODO: replace with the 2C2P payment-inquiry API once the
            // merchant account is provisioned for server-to-server calls.
            info!(transaction_id, "accepted 2C2P transaction (format check)");
            return PaymentOutcome::accepted(reference(info));
        }

        if !self.config.allow_insecure_fallback {
            error!("2C2P credentials missing and insecure fallback is disabled");
            return PaymentOutcome::rejected(
                "2C2P credentials not configured and fallback validation is disabled",
            );
        }

        warn!(
            transaction_id,
            "accepting 2C2P payment WITHOUT server-side validation; \
             configure TWOC2P_MERCHANT_ID and TWOC2P_SECRET_KEY before going live"
        );
        PaymentOutcome::accepted_insecure(reference(info))
    }
}

fn reference(info: &TwoC2PInfo) -> ProviderReference {
    ProviderReference::TwoC2P {
        transaction_id: info.transaction_id.trim().to_string(),
        customer_email: info.customer_email.clone(),
    }
}

fn sign(data: &str, secret_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(secret_key.as_bytes());
    BASE64_STANDARD.encode(hasher.finalize())
}
