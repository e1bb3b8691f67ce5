//! # Payment Outcome
//!
//! The normalized result every payment strategy returns. Produced once per
//! booking attempt and never mutated afterwards; the orchestrator derives the
//! terminal booking status from it.

use crate::booking::ProviderReference;
use crate::error::PaymentError;
use serde::{Deserialize, Serialize};

/// Normalized verification result from a payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// Whether the provider confirmed the payment
    pub accepted: bool,

    /// Reference data to store on the booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ProviderReference>,

    /// Human-readable reason when not accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// Set when a non-production validation path was used to accept.
    /// Such acceptances are logged at warn level and must never occur in a
    /// production configuration.
    #[serde(default)]
    pub insecure_fallback: bool,
}

impl PaymentOutcome {
    /// Payment confirmed by the provider
    pub fn accepted(reference: ProviderReference) -> Self {
        Self {
            accepted: true,
            reference: Some(reference),
            failure_reason: None,
            insecure_fallback: false,
        }
    }

    /// Accepted through an insecure, credentials-missing fallback path
    pub fn accepted_insecure(reference: ProviderReference) -> Self {
        Self {
            accepted: true,
            reference: Some(reference),
            failure_reason: None,
            insecure_fallback: true,
        }
    }

    /// Payment not confirmed
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reference: None,
            failure_reason: Some(reason.into()),
            insecure_fallback: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

impl From<PaymentError> for PaymentOutcome {
    /// Fold a provider error into a rejected outcome; errors never cross the
    /// strategy boundary.
    fn from(err: PaymentError) -> Self {
        PaymentOutcome::rejected(err.to_string())
    }
}
