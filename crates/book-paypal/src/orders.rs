//! # PayPal Two-Phase Checkout
//!
//! Order creation and capture for the PayPal Standard flow: the frontend
//! creates an order, the customer approves it in the PayPal popup, and the
//! backend captures it.
//!
//! Capture is NOT idempotent on PayPal's side: a second capture call against
//! an already-captured order fails. This flow therefore re-fetches the order
//! before capturing and converts an "already captured" response into success
//! by re-querying state instead of retrying the mutating call.

use crate::api::{CaptureCall, PayPalApi, PROVIDER};
use crate::config::PayPalConfig;
use book_core::error::{PaymentError, PaymentResult};
use book_core::money::Price;
use serde_json::json;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Result of capturing (or finding already captured) an order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    pub order_id: String,
    /// Final order status, COMPLETED once money moved
    pub status: String,
    /// Capture id when PayPal reported one
    pub capture_id: Option<String>,
}

/// Two-phase create/capture client for PayPal orders
pub struct PayPalCheckout {
    api: PayPalApi,
}

impl PayPalCheckout {
    /// Create a new checkout client from explicit config
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            api: PayPalApi::new(config),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Ok(Self::new(PayPalConfig::from_env()?))
    }

    /// Create a CAPTURE-intent order for one purchase unit.
    ///
    /// Returns the provider's order id. A fresh `PayPal-Request-Id` makes the
    /// create call safe to retry on transport failures.
    #[instrument(skip(self, total))]
    pub async fn create_order(
        &self,
        total: &Price,
        description: &str,
        custom_id: &str,
    ) -> PaymentResult<String> {
        let token = self.api.access_token().await?;

        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": total.currency.code(),
                    "value": total.as_provider_value(),
                },
                "description": description,
                "custom_id": custom_id,
            }]
        });

        let request_id = Uuid::new_v4().to_string();
        let order = self.api.create_order(&token, &request_id, body).await?;

        info!(order_id = %order.id, "created PayPal order");
        Ok(order.id)
    }

    /// Capture an approved order, treating "already captured" as success.
    ///
    /// The order is re-fetched first: if it (or its capture) is COMPLETED the
    /// existing state is returned without issuing another capture call.
    #[instrument(skip(self))]
    pub async fn capture_order(&self, order_id: &str) -> PaymentResult<CaptureResult> {
        let token = self.api.access_token().await?;
        let order = self.api.fetch_order(&token, order_id).await?;

        if order.is_completed() {
            debug!(order_id, "order already captured, skipping capture call");
            return Ok(capture_result(order_id, &order));
        }

        if order.status != "APPROVED" {
            return Err(PaymentError::Rejected {
                provider: PROVIDER,
                reason: format!("order is not approved for capture (status {})", order.status),
            });
        }

        match self.api.capture_order(&token, order_id).await? {
            CaptureCall::Captured(captured) => {
                info!(order_id, "captured PayPal order");
                Ok(capture_result(order_id, &captured))
            }
            CaptureCall::AlreadyCaptured => {
                // Another capture won the race. Re-query instead of failing.
                let current = self.api.fetch_order(&token, order_id).await?;
                if current.is_completed() {
                    info!(order_id, "capture raced but order is completed");
                    Ok(capture_result(order_id, &current))
                } else {
                    Err(PaymentError::Rejected {
                        provider: PROVIDER,
                        reason: format!(
                            "capture reported as duplicate but order status is {}",
                            current.status
                        ),
                    })
                }
            }
        }
    }
}

fn capture_result(order_id: &str, order: &crate::api::OrderResponse) -> CaptureResult {
    CaptureResult {
        order_id: order_id.to_string(),
        status: order.status.clone(),
        capture_id: order.first_capture().map(|capture| capture.id.clone()),
    }
}

/// Order description the agency uses for tour checkouts, e.g.
/// `"Tirana [Terminal] → Koman - 2 guest(s)"`
pub fn order_description(tour_title: &str, guests: u32) -> String {
    format!("{tour_title} - {guests} guest(s)")
}

/// Custom id tying a PayPal order back to a booking attempt
pub fn booking_custom_id() -> String {
    format!("tour_booking_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_core::money::Currency;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn checkout_for(server: &MockServer) -> PayPalCheckout {
        PayPalCheckout::new(PayPalConfig::new("client", "secret", server.uri()))
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "A21AA-token" })),
            )
            .mount(server)
            .await;
    }

    fn order_json(status: &str, capture: Option<(&str, &str)>) -> serde_json::Value {
        let captures = match capture {
            Some((id, capture_status)) => json!([{ "id": id, "status": capture_status }]),
            None => json!([]),
        };
        json!({
            "id": "5O190127TN364715T",
            "status": status,
            "purchase_units": [{ "payments": { "captures": captures } }]
        })
    }

    #[tokio::test]
    async fn test_create_order_returns_id() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .and(header_exists("PayPal-Request-Id"))
            .and(body_string_contains("\"intent\":\"CAPTURE\""))
            .and(body_string_contains("20.00"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({
                    "id": "5O190127TN364715T",
                    "status": "CREATED"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let order_id = checkout_for(&server)
            .create_order(
                &Price::new(20.0, Currency::EUR),
                &order_description("Tirana [Terminal] → Koman", 2),
                &booking_custom_id(),
            )
            .await
            .unwrap();

        assert_eq!(order_id, "5O190127TN364715T");
    }

    #[tokio::test]
    async fn test_capture_of_approved_order() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/checkout/orders/5O190127TN364715T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("APPROVED", None)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/5O190127TN364715T/capture"))
            .respond_with(ResponseTemplate::new(201).set_body_json(order_json(
                "COMPLETED",
                Some(("3C679366HH908993F", "COMPLETED")),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = checkout_for(&server)
            .capture_order("5O190127TN364715T")
            .await
            .unwrap();

        assert_eq!(result.status, "COMPLETED");
        assert_eq!(result.capture_id.as_deref(), Some("3C679366HH908993F"));
    }

    #[tokio::test]
    async fn test_completed_order_skips_capture_call() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/checkout/orders/5O190127TN364715T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(
                "COMPLETED",
                Some(("3C679366HH908993F", "COMPLETED")),
            )))
            .mount(&server)
            .await;
        // A second capture on a completed order would fail at PayPal
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/5O190127TN364715T/capture"))
            .respond_with(ResponseTemplate::new(422))
            .expect(0)
            .mount(&server)
            .await;

        let result = checkout_for(&server)
            .capture_order("5O190127TN364715T")
            .await
            .unwrap();

        assert_eq!(result.status, "COMPLETED");
    }

    #[tokio::test]
    async fn test_already_captured_resolved_by_requery() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        // First lookup sees APPROVED, the re-query after the 422 sees COMPLETED
        Mock::given(method("GET"))
            .and(path("/v2/checkout/orders/5O190127TN364715T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("APPROVED", None)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/checkout/orders/5O190127TN364715T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json(
                "COMPLETED",
                Some(("3C679366HH908993F", "COMPLETED")),
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders/5O190127TN364715T/capture"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "name": "UNPROCESSABLE_ENTITY",
                "details": [{ "issue": "ORDER_ALREADY_CAPTURED" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = checkout_for(&server)
            .capture_order("5O190127TN364715T")
            .await
            .unwrap();

        assert_eq!(result.status, "COMPLETED");
    }

    #[tokio::test]
    async fn test_unapproved_order_cannot_be_captured() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/v2/checkout/orders/5O190127TN364715T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("CREATED", None)))
            .mount(&server)
            .await;

        let err = checkout_for(&server)
            .capture_order("5O190127TN364715T")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("not approved"));
    }

    #[test]
    fn test_order_description_format() {
        assert_eq!(
            order_description("Koman → Tirana", 3),
            "Koman → Tirana - 3 guest(s)"
        );
    }

    #[test]
    fn test_custom_id_prefix() {
        let custom_id = booking_custom_id();
        assert!(custom_id.starts_with("tour_booking_"));
        assert_ne!(custom_id, booking_custom_id());
    }
}
