//! # book-stripe
//!
//! Stripe payment strategy for the tour-booking pipeline.
//!
//! Verifies a PaymentIntent id server-side and accepts only status
//! `succeeded`. When no secret key is configured the strategy falls back to
//! a `pi_`-shape check, an explicitly insecure development convenience that
//! is logged on every use and disabled in production configurations.

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeStrategy;
