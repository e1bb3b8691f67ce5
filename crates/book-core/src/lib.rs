//! # book-core
//!
//! Core types and traits for the tour-booking payment pipeline.
//!
//! This crate provides:
//! - `BookingRequest`, `Booking`, and the per-provider payment payloads
//! - `validator` for sanitizing and checking requests against a `Tour`
//! - `receipt` for deriving the charge (round trips double the subtotal)
//! - `PaymentStrategy` trait and `PaymentRouter` for provider dispatch
//! - `PaymentOutcome`, the normalized verification result
//! - repository and notifier boundary traits for the excluded outer layers
//! - typed errors (`ValidationError`, `BookingError`, `PaymentError`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use book_core::{validator, PaymentRouter, Receipt};
//!
//! let tour = tours.find_by_id(request.tour_id).unwrap();
//! let validated = validator::validate(&request, &tour)?;
//!
//! let strategy = router.route(validated.method)?;
//! let outcome = strategy.verify_payment(&validated.payload).await;
//!
//! let receipt = Receipt::for_tour(&tour, validated.guests, validated.is_round_trip());
//! ```

pub mod booking;
pub mod error;
pub mod money;
pub mod notify;
pub mod outcome;
pub mod receipt;
pub mod repository;
pub mod strategy;
pub mod tour;
pub mod validator;

// Re-exports for convenience
pub use booking::{
    Booking, BookingRequest, BookingStatus, CardInfo, PaymentMethod, PaymentPayload, PaypalInfo,
    ProviderReference, StripeInfo, TwoC2PInfo,
};
pub use error::{BookingError, NotifyError, PaymentError, PaymentResult, ValidationError};
pub use money::{Currency, Price};
pub use notify::{BookingNotifier, LoggingNotifier};
pub use outcome::PaymentOutcome;
pub use receipt::{compute_total, Receipt};
pub use repository::{BookingRepository, InMemoryBookingRepository, TourRepository};
pub use strategy::{BoxedPaymentStrategy, PaymentRouter, PaymentStrategy};
pub use tour::{Tour, TourCatalog};
pub use validator::{validate, validate_at, ValidatedBooking};
