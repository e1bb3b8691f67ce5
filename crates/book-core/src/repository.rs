//! # Repository Boundaries
//!
//! Persistence lives outside this pipeline; these traits are the full extent
//! of what it relies on. The booking insert is assumed atomic, and there is
//! no update path. A booking is written once, after its status is terminal.

use crate::booking::Booking;
use crate::tour::{Tour, TourCatalog};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Read-only tour lookup
pub trait TourRepository: Send + Sync {
    fn find_by_id(&self, id: u64) -> Option<Tour>;
}

impl TourRepository for TourCatalog {
    fn find_by_id(&self, id: u64) -> Option<Tour> {
        self.get(id).cloned()
    }
}

/// Single-insert booking store
pub trait BookingRepository: Send + Sync {
    /// Persist the booking and return it with its assigned id
    fn save(&self, booking: Booking) -> Booking;
}

/// Booking store backed by a mutex-guarded vec, for tests and embedding
#[derive(Debug)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
    next_id: AtomicU64,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Snapshot of everything saved so far
    pub fn all(&self) -> Vec<Booking> {
        self.bookings.lock().expect("booking store poisoned").clone()
    }

    /// Number of persisted bookings
    pub fn count(&self) -> usize {
        self.bookings.lock().expect("booking store poisoned").len()
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn save(&self, mut booking: Booking) -> Booking {
        booking.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.bookings
            .lock()
            .expect("booking store poisoned")
            .push(booking.clone());
        booking
    }
}
