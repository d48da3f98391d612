use serde::{Deserialize, Serialize};
use serde_json::Value;
use wattpay_common::INR_CURRENCY_CODE;
use wattpay_engine::{checkout_objects::OrderRequest, OrderIssuerError, ReminderResult};

/// The body of a `POST /create-order` request. Only `amount` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The amount in rupees, e.g. `132.50`
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub notes: Option<Value>,
}

impl TryFrom<CreateOrderRequest> for OrderRequest {
    type Error = OrderIssuerError;

    fn try_from(value: CreateOrderRequest) -> Result<Self, Self::Error> {
        let amount = value.amount.ok_or(OrderIssuerError::InvalidAmount)?;
        let mut request = OrderRequest::new(amount);
        request.currency = value.currency.unwrap_or_else(|| INR_CURRENCY_CODE.to_string());
        request.receipt = value.receipt;
        if let Some(notes) = value.notes {
            request = request.with_notes(notes);
        }
        Ok(request)
    }
}

/// The body of a `/send-bill-reminders` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub message: String,
    pub count: usize,
    /// Present only when the batch insert was attempted. `null` if it succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Option<String>>,
}

impl From<ReminderResult> for ReminderResponse {
    fn from(result: ReminderResult) -> Self {
        let message = result.summary();
        match result {
            ReminderResult::NoDueBills => Self { message, count: 0, error: None },
            ReminderResult::Sent { count, error } => Self { message, count, error: Some(error) },
        }
    }
}
