//! # Payment Strategy Trait
//!
//! Uniform verification contract every payment provider implements, and the
//! router that maps a payment method to exactly one registered strategy.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── method()                                               │
//! │  └── verify_payment()                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!        ┌──────────────┬────┴─────────┬──────────────┐
//!        │              │              │              │
//! ┌──────┴───────┐ ┌────┴─────┐ ┌──────┴───────┐ ┌────┴─────┐
//! │PayPalStrategy│ │  Stripe  │ │TwoC2PStrategy│ │CardStub  │
//! └──────────────┘ └──────────┘ └──────────────┘ └──────────┘
//! ```
//!
//! Exactly one strategy is invoked per booking attempt. There is no
//! multi-provider fallback and no retry against a different provider.

use crate::booking::{PaymentMethod, PaymentPayload};
use crate::error::BookingError;
use crate::outcome::PaymentOutcome;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Core trait for payment provider implementations.
///
/// `verify_payment` must be total: provider errors, timeouts, and unparsable
/// responses all fold into a rejected [`PaymentOutcome`], never an `Err` or a
/// panic across this boundary.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// The payment method this strategy handles (used for routing)
    fn method(&self) -> PaymentMethod;

    /// Check with the provider whether the customer's payment is real.
    ///
    /// A payload for a different method is a programming error upstream and
    /// yields a rejected outcome rather than a panic.
    async fn verify_payment(&self, payload: &PaymentPayload) -> PaymentOutcome;
}

/// Type alias for a shared strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

/// Static method → strategy mapping.
///
/// A pure lookup: holds no mutable state besides the registered references.
#[derive(Clone, Default)]
pub struct PaymentRouter {
    strategies: HashMap<PaymentMethod, BoxedPaymentStrategy>,
}

impl PaymentRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register a strategy under its own method
    pub fn register(&mut self, strategy: BoxedPaymentStrategy) {
        self.strategies.insert(strategy.method(), strategy);
    }

    /// Register with builder pattern
    pub fn with_strategy(mut self, strategy: BoxedPaymentStrategy) -> Self {
        self.register(strategy);
        self
    }

    /// Select the strategy for a method
    pub fn route(&self, method: PaymentMethod) -> Result<&BoxedPaymentStrategy, BookingError> {
        self.strategies
            .get(&method)
            .ok_or_else(|| BookingError::UnsupportedMethod(method.as_str().to_string()))
    }

    /// List all registered methods
    pub fn methods(&self) -> Vec<PaymentMethod> {
        self.strategies.keys().copied().collect()
    }

    /// Check whether a method is wired
    pub fn has_method(&self, method: PaymentMethod) -> bool {
        self.strategies.contains_key(&method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{PaypalInfo, ProviderReference};

    struct AcceptAll(PaymentMethod);

    #[async_trait]
    impl PaymentStrategy for AcceptAll {
        fn method(&self) -> PaymentMethod {
            self.0
        }

        async fn verify_payment(&self, _payload: &PaymentPayload) -> PaymentOutcome {
            PaymentOutcome::accepted(ProviderReference::PayPal {
                email: "test@example.com".to_string(),
                transaction_id: "TEST".to_string(),
            })
        }
    }

    #[test]
    fn test_route_to_registered_strategy() {
        let router = PaymentRouter::new().with_strategy(Arc::new(AcceptAll(PaymentMethod::PayPal)));

        assert!(router.route(PaymentMethod::PayPal).is_ok());
        assert!(router.has_method(PaymentMethod::PayPal));
    }

    #[test]
    fn test_unrouted_method_is_unsupported() {
        let router = PaymentRouter::new().with_strategy(Arc::new(AcceptAll(PaymentMethod::PayPal)));

        let err = router.route(PaymentMethod::Stripe).err().unwrap();
        assert_eq!(err, BookingError::UnsupportedMethod("stripe".to_string()));
    }

    #[tokio::test]
    async fn test_dispatch_through_router() {
        let router = PaymentRouter::new().with_strategy(Arc::new(AcceptAll(PaymentMethod::PayPal)));

        let payload = PaymentPayload::PayPal(PaypalInfo {
            email: "test@example.com".to_string(),
            transaction_id: "TEST".to_string(),
        });

        let strategy = router.route(PaymentMethod::PayPal).unwrap();
        let outcome = strategy.verify_payment(&payload).await;
        assert!(outcome.is_accepted());
    }
}
