//! # book-engine
//!
//! Composition root for the tour-booking payment pipeline.
//!
//! Wires the validator, receipt calculator, payment router, and the four
//! provider strategies into one [`BookingEngine`] whose `create_booking` call
//! is the boundary the (external) HTTP layer talks to:
//!
//! - validation and unsupported-method failures raise [`book_core::BookingError`]
//!   (the caller maps these to a 400);
//! - every post-validation outcome (PAID or FAILED) returns an ordinary
//!   persisted [`book_core::Booking`] whose status field tells the story.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use book_engine::{load_tour_catalog, BookingEngine, EngineConfig};
//! use book_core::{InMemoryBookingRepository, LoggingNotifier};
//! use std::sync::Arc;
//!
//! let config = EngineConfig::from_env()?;
//! let engine = BookingEngine::new(
//!     &config,
//!     Arc::new(load_tour_catalog()?),
//!     Arc::new(InMemoryBookingRepository::new()),
//!     Arc::new(LoggingNotifier),
//! );
//!
//! let booking = engine.create_booking(request).await?;
//! println!("booking {} is {}", booking.id.unwrap(), booking.status);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;

// Re-exports
pub use catalog::load_tour_catalog;
pub use config::EngineConfig;
pub use engine::BookingEngine;
