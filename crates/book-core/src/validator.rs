//! # Booking Validation
//!
//! Sanitizes and validates a raw booking request against the tour it targets.
//! Checks run in a fixed order and short-circuit on the first violation; the
//! caller must not proceed to payment on any failure. No I/O, no side effects.

use crate::booking::{BookingRequest, PaymentMethod, PaymentPayload};
use crate::error::{BookingError, ValidationError};
use crate::tour::Tour;
use chrono::{NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A booking request that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub tour_id: u64,
    /// Trimmed customer name
    pub customer_name: String,
    /// Trimmed, lowercased email
    pub customer_email: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub guests: u32,
    pub method: PaymentMethod,
    pub payload: PaymentPayload,
}

impl ValidatedBooking {
    /// A return date makes the trip a round trip
    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

/// Validate a request against today's date
pub fn validate(request: &BookingRequest, tour: &Tour) -> Result<ValidatedBooking, BookingError> {
    validate_at(request, tour, Utc::now().date_naive())
}

/// Validate against an explicit `today`, so date rules stay testable
pub fn validate_at(
    request: &BookingRequest,
    tour: &Tour,
    today: NaiveDate,
) -> Result<ValidatedBooking, BookingError> {
    let customer_name = request.name.trim().to_string();
    if customer_name.is_empty() {
        return Err(ValidationError::MissingName.into());
    }

    let customer_email = request.email.trim().to_lowercase();
    if customer_email.is_empty() || !customer_email.contains('@') {
        return Err(ValidationError::InvalidEmail.into());
    }

    let departure_date = parse_date("departure", &request.departure_date)?;
    if departure_date < today {
        return Err(ValidationError::DepartureInPast.into());
    }

    let return_date = match &request.return_date {
        Some(raw) => {
            let date = parse_date("return", raw)?;
            if date < departure_date {
                return Err(ValidationError::ReturnBeforeDeparture.into());
            }
            Some(date)
        }
        None => None,
    };

    if request.guests < 1 {
        return Err(ValidationError::NoGuests.into());
    }
    if request.guests > tour.max_guests {
        return Err(ValidationError::TooManyGuests {
            requested: request.guests,
            max: tour.max_guests,
        }
        .into());
    }

    let method = PaymentMethod::parse(&request.payment_method)
        .ok_or_else(|| BookingError::UnsupportedMethod(request.payment_method.clone()))?;

    let payload = extract_payload(request, method)
        .ok_or(ValidationError::MissingPaymentDetails(method))
        .map_err(BookingError::from)?;

    Ok(ValidatedBooking {
        tour_id: request.tour_id,
        customer_name,
        customer_email,
        departure_date,
        return_date,
        guests: request.guests,
        method,
        payload,
    })
}

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// The payload populated on the request must match the declared method
fn extract_payload(request: &BookingRequest, method: PaymentMethod) -> Option<PaymentPayload> {
    match method {
        PaymentMethod::Card => request.payment.clone().map(PaymentPayload::Card),
        PaymentMethod::PayPal => request.paypal.clone().map(PaymentPayload::PayPal),
        PaymentMethod::Stripe => request.stripe.clone().map(PaymentPayload::Stripe),
        PaymentMethod::TwoC2P => request.two_c2p.clone().map(PaymentPayload::TwoC2P),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::PaypalInfo;
    use crate::money::{Currency, Price};

    fn tour() -> Tour {
        Tour {
            id: 1,
            title: "Tirana [Terminal] → Koman".to_string(),
            description: String::new(),
            location: "Tirana".to_string(),
            departure_time: Some("06:00".to_string()),
            price: Price::new(10.0, Currency::EUR),
            rating: 5.0,
            max_guests: 50,
        }
    }

    fn paypal_request() -> BookingRequest {
        BookingRequest {
            tour_id: 1,
            name: "  Arta Krasniqi  ".to_string(),
            email: "Arta@Example.COM".to_string(),
            departure_date: "2030-06-01".to_string(),
            return_date: None,
            guests: 2,
            payment_method: "paypal".to_string(),
            payment: None,
            paypal: Some(PaypalInfo {
                email: "arta@example.com".to_string(),
                transaction_id: "5O190127TN364715T".to_string(),
            }),
            stripe: None,
            two_c2p: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
    }

    #[test]
    fn test_valid_request_is_sanitized() {
        let validated = validate_at(&paypal_request(), &tour(), today()).unwrap();

        assert_eq!(validated.customer_name, "Arta Krasniqi");
        assert_eq!(validated.customer_email, "arta@example.com");
        assert_eq!(validated.method, PaymentMethod::PayPal);
        assert!(!validated.is_round_trip());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut req = paypal_request();
        req.name = "   ".to_string();

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(err, BookingError::Validation(ValidationError::MissingName));
    }

    #[test]
    fn test_email_needs_at_sign() {
        let mut req = paypal_request();
        req.email = "arta.example.com".to_string();

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(err, BookingError::Validation(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_departure_in_past_rejected() {
        let mut req = paypal_request();
        req.departure_date = "2030-04-30".to_string();

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(err, BookingError::Validation(ValidationError::DepartureInPast));
    }

    #[test]
    fn test_departure_today_allowed() {
        let mut req = paypal_request();
        req.departure_date = "2030-05-01".to_string();

        assert!(validate_at(&req, &tour(), today()).is_ok());
    }

    #[test]
    fn test_unparsable_date_rejected() {
        let mut req = paypal_request();
        req.departure_date = "01/06/2030".to_string();

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation(ValidationError::InvalidDate { field: "departure", .. })
        ));
    }

    #[test]
    fn test_return_before_departure_rejected() {
        let mut req = paypal_request();
        req.return_date = Some("2030-05-20".to_string());

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(
            err,
            BookingError::Validation(ValidationError::ReturnBeforeDeparture)
        );
    }

    #[test]
    fn test_return_same_day_allowed() {
        let mut req = paypal_request();
        req.return_date = Some("2030-06-01".to_string());

        let validated = validate_at(&req, &tour(), today()).unwrap();
        assert!(validated.is_round_trip());
    }

    #[test]
    fn test_zero_guests_rejected() {
        let mut req = paypal_request();
        req.guests = 0;

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(err, BookingError::Validation(ValidationError::NoGuests));
    }

    #[test]
    fn test_capacity_overflow_rejected() {
        let mut req = paypal_request();
        req.guests = 51;

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(
            err,
            BookingError::Validation(ValidationError::TooManyGuests {
                requested: 51,
                max: 50
            })
        );
    }

    #[test]
    fn test_unknown_method_is_unsupported() {
        let mut req = paypal_request();
        req.payment_method = "bitcoin".to_string();

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(err, BookingError::UnsupportedMethod("bitcoin".to_string()));
    }

    #[test]
    fn test_payload_must_match_method() {
        let mut req = paypal_request();
        req.payment_method = "stripe".to_string(); // paypal payload still set

        let err = validate_at(&req, &tour(), today()).unwrap_err();
        assert_eq!(
            err,
            BookingError::Validation(ValidationError::MissingPaymentDetails(
                PaymentMethod::Stripe
            ))
        );
    }
}
