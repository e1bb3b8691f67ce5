//! # Booking Notifications
//!
//! Boundary trait for the confirmation mails the agency sends after a
//! booking attempt. Delivery is best-effort: the orchestrator logs failures
//! and never lets them change the booking outcome or the returned value.

use crate::booking::Booking;
use crate::error::NotifyError;
use crate::receipt::Receipt;
use tracing::info;

/// Customer confirmation + agency notification hooks
pub trait BookingNotifier: Send + Sync {
    /// Receipt mail to the customer
    fn send_confirmation(&self, booking: &Booking, receipt: &Receipt) -> Result<(), NotifyError>;

    /// Heads-up mail to the agency inbox
    fn send_notification(&self, booking: &Booking, receipt: &Receipt) -> Result<(), NotifyError>;
}

/// Notifier that logs instead of delivering mail.
///
/// Useful as a default wiring and in tests; template rendering and SMTP live
/// outside this crate.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

impl BookingNotifier for LoggingNotifier {
    fn send_confirmation(&self, booking: &Booking, receipt: &Receipt) -> Result<(), NotifyError> {
        info!(
            booking_id = ?booking.id,
            customer = %booking.customer_email,
            status = %booking.status,
            guests = receipt.guests,
            subtotal = %receipt.subtotal.display(),
            total = %receipt.total.display(),
            "booking confirmation"
        );
        Ok(())
    }

    fn send_notification(&self, booking: &Booking, receipt: &Receipt) -> Result<(), NotifyError> {
        info!(
            booking_id = ?booking.id,
            customer = %booking.customer_name,
            method = %booking.payment_method,
            total = %receipt.total.display(),
            "new booking received"
        );
        Ok(())
    }
}
