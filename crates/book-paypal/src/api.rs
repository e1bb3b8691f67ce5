//! # PayPal Wire Client
//!
//! Thin typed client over the PayPal REST endpoints this crate needs:
//! the OAuth2 token exchange, order fetch, order creation, and capture.
//!
//! Tokens are NOT cached: every operation authenticates itself with a fresh
//! client-credentials exchange. That costs a round trip per call but leaves
//! no shared token state to race or expire mid-flight.

use crate::config::PayPalConfig;
use book_core::error::{PaymentError, PaymentResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, error};

pub(crate) const PROVIDER: &str = "paypal";

/// Order statuses that can still lead to an accepted payment
pub(crate) const PAYABLE_ORDER_STATUSES: [&str; 2] = ["COMPLETED", "APPROVED"];

/// Capture statuses that count as money moving
pub(crate) const PAYABLE_CAPTURE_STATUSES: [&str; 2] = ["COMPLETED", "PENDING"];

// =============================================================================
// PayPal API Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderResponse {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PurchaseUnit {
    #[serde(default)]
    pub payments: Option<Payments>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Payments {
    #[serde(default)]
    pub captures: Vec<CaptureNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CaptureNode {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub status_details: Option<CaptureStatusDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CaptureStatusDetails {
    #[serde(default)]
    pub reason: Option<String>,
}

impl OrderResponse {
    /// First capture of the first purchase unit, where PayPal reports the
    /// money movement for single-item orders
    pub fn first_capture(&self) -> Option<&CaptureNode> {
        self.purchase_units
            .first()
            .and_then(|unit| unit.payments.as_ref())
            .and_then(|payments| payments.captures.first())
    }

    /// Whether the order itself, or its capture, already reached COMPLETED
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
            || self
                .first_capture()
                .is_some_and(|capture| capture.status == "COMPLETED")
    }
}

/// Result of a capture call at the wire level
pub(crate) enum CaptureCall {
    /// The capture went through; PayPal returned the updated order
    Captured(OrderResponse),
    /// 409/422: the order was captured before this call. Capture is not
    /// idempotent at PayPal, so callers must re-query instead of retrying.
    AlreadyCaptured,
}

// =============================================================================
// Client
// =============================================================================

/// Typed client bound to one [`PayPalConfig`]
#[derive(Debug, Clone)]
pub(crate) struct PayPalApi {
    config: PayPalConfig,
    client: Client,
}

impl PayPalApi {
    pub fn new(config: PayPalConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// OAuth2 client-credentials grant, executed fresh for every operation
    pub async fn access_token(&self) -> PaymentResult<String> {
        let url = format!("{}/v1/oauth2/token", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!(%status, "PayPal token exchange failed");
            return Err(PaymentError::Auth {
                provider: PROVIDER,
                message: format!("token endpoint returned HTTP {}", status.as_u16()),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse PayPal token response: {e}"))
        })?;

        Ok(token.access_token)
    }

    /// `GET /v2/checkout/orders/{id}`
    pub async fn fetch_order(&self, token: &str, order_id: &str) -> PaymentResult<OrderResponse> {
        let url = format!("{}/v2/checkout/orders/{}", self.config.api_base_url, order_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!(%status, order_id, "PayPal order lookup failed");
            return Err(provider_error(status, &body));
        }

        debug!(order_id, "fetched PayPal order");
        parse_order(&body)
    }

    /// `POST /v2/checkout/orders`
    pub async fn create_order(
        &self,
        token: &str,
        request_id: &str,
        body: serde_json::Value,
    ) -> PaymentResult<OrderResponse> {
        let url = format!("{}/v2/checkout/orders", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("PayPal-Request-Id", request_id)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!(%status, "PayPal order creation failed");
            return Err(provider_error(status, &body));
        }

        parse_order(&body)
    }

    /// `POST /v2/checkout/orders/{id}/capture`.
    ///
    /// 409 and 422 responses are surfaced as [`CaptureCall::AlreadyCaptured`]
    /// so the caller can re-query the order instead of failing the booking.
    pub async fn capture_order(&self, token: &str, order_id: &str) -> PaymentResult<CaptureCall> {
        let url = format!(
            "{}/v2/checkout/orders/{}/capture",
            self.config.api_base_url, order_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::CONFLICT || status == StatusCode::UNPROCESSABLE_ENTITY {
            debug!(order_id, %status, "capture reported as already processed");
            return Ok(CaptureCall::AlreadyCaptured);
        }

        if !status.is_success() {
            error!(%status, order_id, "PayPal capture failed");
            return Err(provider_error(status, &body));
        }

        Ok(CaptureCall::Captured(parse_order(&body)?))
    }
}

fn parse_order(body: &str) -> PaymentResult<OrderResponse> {
    serde_json::from_str(body).map_err(|e| {
        PaymentError::Serialization(format!("Failed to parse PayPal order response: {e}"))
    })
}

fn transport_error(e: reqwest::Error) -> PaymentError {
    let message = if e.is_timeout() {
        format!("timed out: {e}")
    } else {
        e.to_string()
    };
    PaymentError::Unavailable {
        provider: PROVIDER,
        message,
    }
}

fn provider_error(status: StatusCode, body: &str) -> PaymentError {
    PaymentError::Provider {
        provider: PROVIDER,
        message: format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        ),
    }
}
