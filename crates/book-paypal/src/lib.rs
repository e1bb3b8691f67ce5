//! # book-paypal
//!
//! PayPal payment strategy for the tour-booking pipeline.
//!
//! Two flows are supported:
//!
//! 1. **Direct verification** (`PayPalStrategy`): the frontend completed a
//!    PayPal checkout and handed us an order id; we authenticate, fetch the
//!    order, and accept only payable order/capture states. Synthetic
//!    fallback ids are rejected outright.
//!
//! 2. **Two-phase checkout** (`PayPalCheckout`): create a CAPTURE-intent
//!    order, then capture it once the customer approved. Already-captured
//!    orders resolve to success by re-querying state, because capture itself
//!    is not idempotent at the provider.
//!
//! Every operation performs its own OAuth2 client-credentials exchange; no
//! token is cached between calls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use book_paypal::PayPalStrategy;
//! use book_core::PaymentStrategy;
//!
//! let strategy = PayPalStrategy::from_env()?;
//! let outcome = strategy.verify_payment(&payload).await;
//! assert!(outcome.is_accepted());
//! ```

mod api;

pub mod config;
pub mod orders;
pub mod verify;

// Re-exports
pub use config::PayPalConfig;
pub use orders::{booking_custom_id, order_description, CaptureResult, PayPalCheckout};
pub use verify::{PayPalStrategy, SYNTHETIC_PREFIXES};
