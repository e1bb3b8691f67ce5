//! # Booking Orchestration
//!
//! Sequences a booking attempt through its state machine:
//!
//! ```text
//! CREATED → VALIDATING → REJECTED                 (bad request, never persisted)
//!                      ↘ PAYING → PAID            (provider confirmed)
//!                               ↘ FAILED          (provider did not confirm)
//! ```
//!
//! PAID and FAILED are both terminal and both persisted. A FAILED booking is
//! the audit record distinguishing "bad payment" from "bad request". Every
//! attempt runs to a terminal state before returning; payment-stage failures
//! are values, never errors.

use crate::config::EngineConfig;
use book_core::booking::{Booking, BookingRequest, BookingStatus};
use book_core::error::{BookingError, ValidationError};
use book_core::notify::BookingNotifier;
use book_core::receipt::Receipt;
use book_core::repository::{BookingRepository, TourRepository};
use book_core::strategy::PaymentRouter;
use book_core::validator;
use book_card::CardStrategy;
use book_paypal::PayPalStrategy;
use book_stripe::StripeStrategy;
use book_twoc2p::TwoC2PStrategy;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// States a booking attempt moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptState {
    Created,
    Validating,
    Paying,
    Rejected,
    Paid,
    Failed,
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttemptState::Created => "CREATED",
            AttemptState::Validating => "VALIDATING",
            AttemptState::Paying => "PAYING",
            AttemptState::Rejected => "REJECTED",
            AttemptState::Paid => "PAID",
            AttemptState::Failed => "FAILED",
        };
        write!(f, "{s}")
    }
}

/// Composition root of the booking pipeline.
///
/// Each call to [`create_booking`](BookingEngine::create_booking) is an
/// independent, synchronous attempt; the engine holds no per-booking state.
pub struct BookingEngine {
    router: PaymentRouter,
    tours: Arc<dyn TourRepository>,
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn BookingNotifier>,
}

impl BookingEngine {
    /// Wire the engine with all four provider strategies built from `config`
    pub fn new(
        config: &EngineConfig,
        tours: Arc<dyn TourRepository>,
        bookings: Arc<dyn BookingRepository>,
        notifier: Arc<dyn BookingNotifier>,
    ) -> Self {
        let router = PaymentRouter::new()
            .with_strategy(Arc::new(PayPalStrategy::new(config.paypal.clone())))
            .with_strategy(Arc::new(StripeStrategy::new(config.stripe.clone())))
            .with_strategy(Arc::new(TwoC2PStrategy::new(config.twoc2p.clone())))
            .with_strategy(Arc::new(CardStrategy::new()));

        Self::with_router(router, tours, bookings, notifier)
    }

    /// Wire the engine with an explicit router (test seam and embedders)
    pub fn with_router(
        router: PaymentRouter,
        tours: Arc<dyn TourRepository>,
        bookings: Arc<dyn BookingRepository>,
        notifier: Arc<dyn BookingNotifier>,
    ) -> Self {
        Self {
            router,
            tours,
            bookings,
            notifier,
        }
    }

    /// Run one booking attempt to a terminal state.
    ///
    /// Errors are raised only for pre-payment failures (validation,
    /// unsupported method), and nothing is persisted for those. Once a payment
    /// strategy has been invoked the attempt always resolves to a persisted
    /// PAID or FAILED booking.
    #[instrument(skip(self, request), fields(tour_id = request.tour_id))]
    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        let mut state = AttemptState::Created;
        debug!(%state, method = %request.payment_method, "booking attempt received");

        state = AttemptState::Validating;

        let Some(tour) = self.tours.find_by_id(request.tour_id) else {
            state = AttemptState::Rejected;
            info!(%state, tour_id = request.tour_id, "unknown tour");
            return Err(ValidationError::UnknownTour(request.tour_id).into());
        };

        let validated = match validator::validate(&request, &tour) {
            Ok(validated) => validated,
            Err(err) => {
                state = AttemptState::Rejected;
                info!(%state, error = %err, "booking request rejected");
                return Err(err);
            }
        };

        let strategy = match self.router.route(validated.method) {
            Ok(strategy) => strategy,
            Err(err) => {
                state = AttemptState::Rejected;
                info!(%state, error = %err, "no strategy for payment method");
                return Err(err);
            }
        };

        state = AttemptState::Paying;
        debug!(%state, method = %validated.method, guests = validated.guests, "verifying payment");

        let receipt = Receipt::for_tour(&tour, validated.guests, validated.is_round_trip());
        let mut booking = Booking {
            id: None,
            tour_id: tour.id,
            customer_name: validated.customer_name.clone(),
            customer_email: validated.customer_email.clone(),
            departure_date: validated.departure_date,
            return_date: validated.return_date,
            guests: validated.guests,
            payment_method: validated.method,
            status: BookingStatus::Pending,
            payment: None,
            failure_reason: None,
            total: receipt.total.clone(),
            created_at: Utc::now(),
        };

        let outcome = strategy.verify_payment(&validated.payload).await;

        if outcome.insecure_fallback {
            warn!(method = %validated.method, "payment accepted through an insecure fallback path");
        }

        if outcome.is_accepted() {
            booking.payment = outcome.reference;
            booking.settle(BookingStatus::Paid);
            state = AttemptState::Paid;
        } else {
            booking.failure_reason = outcome.failure_reason;
            booking.settle(BookingStatus::Failed);
            state = AttemptState::Failed;
        }

        let saved = self.bookings.save(booking);

        // Notifications are best-effort and never change the outcome
        if let Err(err) = self.notifier.send_confirmation(&saved, &receipt) {
            error!(booking_id = ?saved.id, error = %err, "customer confirmation failed");
        }
        if let Err(err) = self.notifier.send_notification(&saved, &receipt) {
            error!(booking_id = ?saved.id, error = %err, "agency notification failed");
        }

        info!(
            %state,
            booking_id = ?saved.id,
            total = %saved.total.display(),
            "booking attempt settled"
        );
        Ok(saved)
    }
}
