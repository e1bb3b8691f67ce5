//! # book-twoc2p
//!
//! 2C2P payment strategy for the tour-booking pipeline.
//!
//! Provides transaction-id verification (a format sanity check, flagged
//! insecure when no merchant credentials are configured) and signed
//! hosted-payment redirect URL construction
//! (`base64(sha256(data + secret))` over the payment request string).

pub mod config;
pub mod strategy;

// Re-exports
pub use config::TwoC2PConfig;
pub use strategy::TwoC2PStrategy;
