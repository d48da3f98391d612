//! Razorpay-backed implementation of the engine's [`OrderIssuer`].
use chrono::Utc;
use log::*;
use razorpay_tools::{NewGatewayOrder, RazorpayApi, RazorpayApiError, RazorpayConfig};
use serde_json::json;
use wattpay_common::Paise;
use wattpay_engine::{
    checkout_objects::{OrderHandle, OrderRequest},
    OrderIssuer,
    OrderIssuerError,
};

use crate::errors::ServerError;

pub const MISSING_CREDENTIALS: &str = "Razorpay credentials not configured";

/// Mints Razorpay orders. Constructed without credentials, every request fails with a configuration error.
#[derive(Clone)]
pub struct RazorpayOrderIssuer {
    api: Option<RazorpayApi>,
}

impl RazorpayOrderIssuer {
    pub fn new(config: Option<RazorpayConfig>) -> Result<Self, ServerError> {
        let api = config
            .map(RazorpayApi::new)
            .transpose()
            .map_err(|e| ServerError::InitializeError(format!("Could not create the Razorpay client. {e}")))?;
        Ok(Self { api })
    }

    fn api(&self) -> Result<&RazorpayApi, OrderIssuerError> {
        self.api.as_ref().ok_or_else(|| OrderIssuerError::ConfigurationError(MISSING_CREDENTIALS.to_string()))
    }
}

impl OrderIssuer for RazorpayOrderIssuer {
    fn ready(&self) -> Result<(), OrderIssuerError> {
        self.api().map(|_| ())
    }

    async fn issue_order(&self, request: OrderRequest) -> Result<OrderHandle, OrderIssuerError> {
        let api = self.api()?;
        if request.amount.is_nan() || request.amount <= 0.0 {
            debug!("💳️ Rejecting order request with amount {}", request.amount);
            return Err(OrderIssuerError::InvalidAmount);
        }
        // Positive amounts below half a paisa round to zero. They are still sent, and the gateway rejects them.
        let amount = Paise::try_from(request.amount).map_err(|_| OrderIssuerError::InvalidAmount)?;
        let receipt = request.receipt.unwrap_or_else(|| format!("rcpt_{}", Utc::now().timestamp_millis()));
        let notes = if request.notes.is_null() { json!({}) } else { request.notes };
        let order = NewGatewayOrder { amount, currency: request.currency, receipt, notes };
        let order = api.create_order(&order).await.map_err(|e| match e {
            RazorpayApiError::QueryError { status, message } => OrderIssuerError::GatewayError { status, message },
            e => OrderIssuerError::Unavailable(e.to_string()),
        })?;
        info!("💳️ Razorpay order {} created for {}", order.id, order.amount);
        Ok(OrderHandle {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            key_id: api.key_id().to_string(),
        })
    }
}
