//! # Error Types
//!
//! Typed errors for the booking pipeline. Only pre-payment failures
//! (validation, unsupported method) ever surface to the caller of the
//! booking boundary; everything after a payment strategy is invoked resolves
//! to a FAILED booking instead of an error.

use crate::booking::PaymentMethod;
use thiserror::Error;

/// A booking request violation, caught before any provider is contacted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("a valid email address is required")]
    InvalidEmail,

    #[error("invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("departure date cannot be in the past")]
    DepartureInPast,

    #[error("return date must be on or after the departure date")]
    ReturnBeforeDeparture,

    #[error("number of guests must be at least 1")]
    NoGuests,

    #[error("number of guests ({requested}) exceeds tour capacity ({max})")]
    TooManyGuests { requested: u32, max: u32 },

    #[error("unknown tour id: {0}")]
    UnknownTour(u64),

    #[error("missing {0} payment details")]
    MissingPaymentDetails(PaymentMethod),
}

/// Request-level failure of the booking boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Payment method outside the supported enum (or not wired in the router)
    #[error("unsupported payment method: {0}")]
    UnsupportedMethod(String),
}

/// Provider-side failure, used inside adapters and by the two-phase
/// PayPal flow. `verify_payment` never returns these; it folds them into a
/// rejected [`PaymentOutcome`](crate::outcome::PaymentOutcome).
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Missing or malformed credentials/endpoints
    #[error("configuration error: {0}")]
    Configuration(String),

    /// OAuth or API-key authentication with the provider failed
    #[error("authentication with {provider} failed: {message}")]
    Auth {
        provider: &'static str,
        message: String,
    },

    /// The provider explicitly declined, or the payment state is not payable
    #[error("{provider} rejected the payment: {reason}")]
    Rejected {
        provider: &'static str,
        reason: String,
    },

    /// Timeout or transport failure talking to the provider
    #[error("{provider} unavailable: {message}")]
    Unavailable {
        provider: &'static str,
        message: String,
    },

    /// Non-2xx status or a response shape we do not recognize
    #[error("unexpected {provider} response: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// Response body could not be parsed
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for provider operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Notification delivery failure. Always best-effort: the orchestrator logs
/// these and never lets them touch the booking outcome.
#[derive(Debug, Clone, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::TooManyGuests {
            requested: 51,
            max: 50,
        };
        assert_eq!(
            err.to_string(),
            "number of guests (51) exceeds tour capacity (50)"
        );

        let err = ValidationError::InvalidDate {
            field: "departure",
            value: "tomorrow-ish".to_string(),
        };
        assert_eq!(err.to_string(), "invalid departure date: tomorrow-ish");
    }

    #[test]
    fn test_validation_wraps_into_booking_error() {
        let err: BookingError = ValidationError::MissingName.into();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_unsupported_method_message() {
        let err = BookingError::UnsupportedMethod("bitcoin".to_string());
        assert_eq!(err.to_string(), "unsupported payment method: bitcoin");
    }
}
