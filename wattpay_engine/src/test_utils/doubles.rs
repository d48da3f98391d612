//! Stand-ins for the gateway, for exercising [`crate::CheckoutApi`] against a real database.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use wattpay_common::Paise;

use crate::{
    checkout_objects::{CheckoutOptions, CheckoutOutcome, OrderHandle, OrderRequest},
    HostedCheckout,
    OrderIssuer,
    OrderIssuerError,
};

/// Issues orders without calling out anywhere, or fails every request with a fixed error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIssuer {
    failure: Option<OrderIssuerError>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedIssuer {
    pub fn failing(error: OrderIssuerError) -> Self {
        Self { failure: Some(error), calls: Arc::default() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OrderIssuer for ScriptedIssuer {
    async fn issue_order(&self, request: OrderRequest) -> Result<OrderHandle, OrderIssuerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        if request.amount.is_nan() || request.amount <= 0.0 {
            return Err(OrderIssuerError::InvalidAmount);
        }
        let amount = Paise::try_from(request.amount).map_err(|_| OrderIssuerError::InvalidAmount)?;
        Ok(OrderHandle {
            order_id: format!("order_test_{n}"),
            amount,
            currency: request.currency,
            key_id: "rzp_test_key".to_string(),
        })
    }
}

/// A hosted checkout that always reports the same outcome.
#[derive(Debug, Clone)]
pub struct ScriptedCheckout {
    outcome: CheckoutOutcome,
}

impl ScriptedCheckout {
    pub fn new(outcome: CheckoutOutcome) -> Self {
        Self { outcome }
    }

    pub fn succeeding<S: Into<String>>(payment_id: S) -> Self {
        Self::new(CheckoutOutcome::Succeeded { payment_id: Some(payment_id.into()) })
    }
}

impl HostedCheckout for ScriptedCheckout {
    async fn open(&self, _options: CheckoutOptions) -> CheckoutOutcome {
        self.outcome.clone()
    }
}
