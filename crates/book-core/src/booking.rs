//! # Booking Types
//!
//! The raw booking request as customers submit it, the per-provider payment
//! payloads, and the booking record that gets persisted.
//!
//! Field names on the wire stay camelCase to match the frontend contract.

use crate::money::Price;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    PayPal,
    Card,
    Stripe,
    TwoC2P,
}

impl PaymentMethod {
    /// All methods the pipeline knows about
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::PayPal,
        PaymentMethod::Card,
        PaymentMethod::Stripe,
        PaymentMethod::TwoC2P,
    ];

    /// Case-insensitive parse; `None` for anything outside the enum
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "paypal" => Some(PaymentMethod::PayPal),
            "card" => Some(PaymentMethod::Card),
            "stripe" => Some(PaymentMethod::Stripe),
            "twoc2p" => Some(PaymentMethod::TwoC2P),
            _ => None,
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::Card => "card",
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::TwoC2P => "twoc2p",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Card details for the "card" method.
///
/// Raw card capture is a stub-only flow; see the card strategy crate for the
/// production caveats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

/// PayPal details for the "paypal" method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalInfo {
    pub email: String,
    /// PayPal order id from the frontend checkout
    pub transaction_id: String,
}

/// Stripe details for the "stripe" method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeInfo {
    pub payment_intent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// 2C2P details for the "twoc2p" method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoC2PInfo {
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// A raw booking request, exactly one payment payload populated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub tour_id: u64,
    pub name: String,
    pub email: String,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub guests: u32,
    /// Raw method string; parsed case-insensitively during validation
    pub payment_method: String,
    /// Card payload, for the "card" method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<CardInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal: Option<PaypalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe: Option<StripeInfo>,
    #[serde(default, rename = "twoC2P", skip_serializing_if = "Option::is_none")]
    pub two_c2p: Option<TwoC2PInfo>,
}

/// The payload a strategy verifies, tagged by method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentPayload {
    Card(CardInfo),
    PayPal(PaypalInfo),
    Stripe(StripeInfo),
    TwoC2P(TwoC2PInfo),
}

impl PaymentPayload {
    /// The method this payload belongs to
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentPayload::Card(_) => PaymentMethod::Card,
            PaymentPayload::PayPal(_) => PaymentMethod::PayPal,
            PaymentPayload::Stripe(_) => PaymentMethod::Stripe,
            PaymentPayload::TwoC2P(_) => PaymentMethod::TwoC2P,
        }
    }
}

/// Provider reference stored on a booking once payment was checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderReference {
    Card {
        /// Masked card number, last four digits only
        last4: String,
        holder: String,
        address: String,
        city: String,
        zip: String,
        country: String,
    },
    PayPal {
        email: String,
        transaction_id: String,
    },
    Stripe {
        payment_intent_id: String,
        customer_email: Option<String>,
    },
    TwoC2P {
        transaction_id: String,
        customer_email: Option<String>,
    },
}

impl ProviderReference {
    /// The identifier worth showing in logs and audit trails
    pub fn reference_id(&self) -> &str {
        match self {
            ProviderReference::Card { last4, .. } => last4,
            ProviderReference::PayPal { transaction_id, .. } => transaction_id,
            ProviderReference::Stripe { payment_intent_id, .. } => payment_intent_id,
            ProviderReference::TwoC2P { transaction_id, .. } => transaction_id,
        }
    }
}

/// Booking payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Paid,
    Failed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Paid => "PAID",
            BookingStatus::Failed => "FAILED",
        };
        write!(f, "{s}")
    }
}

/// The booking record handed to persistence.
///
/// Bookings are persisted for PAID and FAILED outcomes alike; a FAILED row is
/// the audit trail distinguishing a bad payment from a bad request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Assigned by the repository on save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub tour_id: u64,
    pub customer_name: String,
    pub customer_email: String,
    pub departure_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    pub guests: u32,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
    /// Set on PAID bookings (and on card stubs which always store billing data)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<ProviderReference>,
    /// Why the payment was not accepted, kept for audit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Computed charge for the whole party
    pub total: Price,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Move a pending booking to a terminal status.
    ///
    /// The status is assigned exactly once; a second settle attempt is
    /// refused and reported via the return value.
    pub fn settle(&mut self, status: BookingStatus) -> bool {
        if self.status != BookingStatus::Pending {
            tracing::warn!(
                current = %self.status,
                requested = %status,
                "refusing to re-settle booking"
            );
            return false;
        }
        self.status = status;
        true
    }

    /// True once the booking reached PAID or FAILED
    pub fn is_settled(&self) -> bool {
        self.status != BookingStatus::Pending
    }
}
