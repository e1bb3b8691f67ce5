//! # Receipt Calculation
//!
//! Monetary totals for a booking. One-way trips charge price × guests;
//! round trips double the subtotal. No tax line: the doubling policy
//! replaced the old 10% tax surcharge.

use crate::money::Price;
use crate::tour::Tour;
use serde::{Deserialize, Serialize};

/// Total charge for a party
pub fn compute_total(price_per_person: &Price, guests: u32, round_trip: bool) -> Price {
    let base = price_per_person.amount * guests as i64;
    let amount = if round_trip { base * 2 } else { base };
    Price::from_cents(amount, price_per_person.currency)
}

/// Itemized breakdown carried to the booking notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub price_per_person: Price,
    pub guests: u32,
    pub round_trip: bool,
    pub subtotal: Price,
    pub total: Price,
}

impl Receipt {
    /// Itemize the charge for `guests` people on `tour`
    pub fn for_tour(tour: &Tour, guests: u32, round_trip: bool) -> Self {
        let subtotal = compute_total(&tour.price, guests, false);
        let total = compute_total(&tour.price, guests, round_trip);
        Self {
            price_per_person: tour.price.clone(),
            guests,
            round_trip,
            subtotal,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_one_way_total() {
        let price = Price::new(10.0, Currency::EUR);
        let total = compute_total(&price, 3, false);
        assert_eq!(total, Price::new(30.0, Currency::EUR));
    }

    #[test]
    fn test_round_trip_doubles() {
        let price = Price::new(10.0, Currency::EUR);
        let total = compute_total(&price, 3, true);
        assert_eq!(total, Price::new(60.0, Currency::EUR));
    }

    #[test]
    fn test_receipt_breakdown() {
        let tour = Tour {
            id: 3,
            title: "Fierza → Valbonë".to_string(),
            description: String::new(),
            location: "Fierza".to_string(),
            departure_time: Some("12:30".to_string()),
            price: Price::new(7.0, Currency::EUR),
            rating: 5.0,
            max_guests: 50,
        };

        let receipt = Receipt::for_tour(&tour, 4, true);
        assert_eq!(receipt.subtotal, Price::new(28.0, Currency::EUR));
        assert_eq!(receipt.total, Price::new(56.0, Currency::EUR));
        assert!(receipt.round_trip);
    }
}
