//! # book-card
//!
//! Direct card stub for the tour-booking pipeline.
//!
//! THIS IS A PLACEHOLDER, NOT A CARD PROCESSOR. It runs a card-number length
//! heuristic, stores the masked last four digits plus billing fields, and
//! accepts. No charge is made, no issuer is contacted, and raw PAN handling
//! like this is not PCI-compliant. Replace with a tokenized/hosted-fields
//! processor before any production use; until then every acceptance is
//! flagged as an insecure fallback and logged at warn.

use async_trait::async_trait;
use book_core::booking::{CardInfo, PaymentMethod, PaymentPayload, ProviderReference};
use book_core::outcome::PaymentOutcome;
use book_core::strategy::PaymentStrategy;
use tracing::{instrument, warn};

/// Card numbers are 13–19 digits across the major schemes
const MIN_CARD_DIGITS: usize = 13;
const MAX_CARD_DIGITS: usize = 19;

/// Stub strategy for the "card" payment method
#[derive(Debug, Clone, Default)]
pub struct CardStrategy;

impl CardStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Digits of the card number with separators stripped, or `None` when
    /// anything besides digits, spaces, and dashes shows up
    fn digits(number: &str) -> Option<String> {
        let mut digits = String::with_capacity(number.len());
        for c in number.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                _ => return None,
            }
        }
        Some(digits)
    }
}

#[async_trait]
impl PaymentStrategy for CardStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Card
    }

    #[instrument(skip(self, payload))]
    async fn verify_payment(&self, payload: &PaymentPayload) -> PaymentOutcome {
        let PaymentPayload::Card(info) = payload else {
            return PaymentOutcome::rejected(format!(
                "card strategy received a {} payload",
                payload.method()
            ));
        };

        let Some(digits) = Self::digits(&info.number) else {
            return PaymentOutcome::rejected("card number contains invalid characters");
        };

        if digits.len() < MIN_CARD_DIGITS || digits.len() > MAX_CARD_DIGITS {
            return PaymentOutcome::rejected(format!(
                "invalid card number length: {}",
                digits.len()
            ));
        }

        warn!(
            holder = %info.name,
            "card stub accepted a payment without charging anything; \
             replace with a tokenized card processor before production use"
        );

        PaymentOutcome::accepted_insecure(reference(info, &digits))
    }
}

fn reference(info: &CardInfo, digits: &str) -> ProviderReference {
    // Length heuristic guarantees at least 13 digits here
    let last4 = digits[digits.len() - 4..].to_string();
    ProviderReference::Card {
        last4,
        holder: info.name.clone(),
        address: info.address.clone(),
        city: info.city.clone(),
        zip: info.zip.clone(),
        country: info.country.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str) -> PaymentPayload {
        PaymentPayload::Card(CardInfo {
            number: number.to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            name: "Arta Krasniqi".to_string(),
            address: "Rruga e Durrësit 12".to_string(),
            city: "Tirana".to_string(),
            zip: "1001".to_string(),
            country: "AL".to_string(),
        })
    }

    #[tokio::test]
    async fn test_valid_number_accepted_and_masked() {
        let outcome = CardStrategy::new()
            .verify_payment(&card("4111 1111 1111 1111"))
            .await;

        assert!(outcome.is_accepted());
        assert!(outcome.insecure_fallback);
        match outcome.reference.unwrap() {
            ProviderReference::Card { last4, holder, city, .. } => {
                assert_eq!(last4, "1111");
                assert_eq!(holder, "Arta Krasniqi");
                assert_eq!(city, "Tirana");
            }
            other => panic!("unexpected reference: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_short_number_rejected() {
        let outcome = CardStrategy::new().verify_payment(&card("4111 1111")).await;

        assert!(!outcome.is_accepted());
        assert!(outcome.failure_reason.unwrap().contains("length"));
    }

    #[tokio::test]
    async fn test_twenty_digits_rejected() {
        let outcome = CardStrategy::new()
            .verify_payment(&card("41111111111111111111"))
            .await;

        assert!(!outcome.is_accepted());
    }

    #[tokio::test]
    async fn test_letters_rejected() {
        let outcome = CardStrategy::new()
            .verify_payment(&card("4111-1111-abcd-1111"))
            .await;

        assert!(!outcome.is_accepted());
        assert!(outcome.failure_reason.unwrap().contains("invalid characters"));
    }
}
