//! # Money Types
//!
//! Currencies and prices for tour bookings.
//! Amounts are stored in the smallest currency unit to keep arithmetic exact.

use serde::{Deserialize, Serialize};

/// Currencies the agency charges in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    EUR,
    USD,
    GBP,
    /// Albanian lek
    ALL,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::EUR => "eur",
            Currency::USD => "usd",
            Currency::GBP => "gbp",
            Currency::ALL => "all",
        }
    }

    /// Uppercase code as providers expect it (e.g. "EUR" in a PayPal amount)
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::ALL => "ALL",
        }
    }

    /// Number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        2
    }

    /// Convert a decimal amount to the smallest currency unit (cents, qindarka)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::EUR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for EUR)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from the smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Decimal string the provider APIs expect (e.g. "20.00")
    pub fn as_provider_value(&self) -> String {
        format!("{:.2}", self.as_decimal())
    }

    /// Format for display (e.g., "€10.00")
    pub fn display(&self) -> String {
        let symbol = match self.currency {
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::ALL => "L",
        };
        format!("{}{:.2}", symbol, self.as_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_unit_round_trip() {
        let price = Price::new(10.0, Currency::EUR);
        assert_eq!(price.amount, 1000);
        assert_eq!(price.as_decimal(), 10.0);
    }

    #[test]
    fn test_provider_value_formatting() {
        assert_eq!(Price::from_cents(2000, Currency::EUR).as_provider_value(), "20.00");
        assert_eq!(Price::new(0.01, Currency::EUR).as_provider_value(), "0.01");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(7.0, Currency::EUR).display(), "€7.00");
        assert_eq!(Price::new(7.5, Currency::USD).display(), "$7.50");
    }
}
