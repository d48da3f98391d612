use thiserror::Error;

use crate::traits::BillingDatabaseError;

/// The ways in which asking the gateway for an order can fail.
#[derive(Debug, Clone, Error)]
pub enum OrderIssuerError {
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("{0}")]
    ConfigurationError(String),
    #[error("Razorpay API error [{status}]: {message}")]
    GatewayError { status: u16, message: String },
    #[error("Could not reach the order issuer. {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("Could not create a payment order. {0}")]
    OrderFailed(#[from] OrderIssuerError),
    #[error("Payment cancelled")]
    Cancelled,
    #[error("Payment failed. {0}")]
    PaymentFailed(String),
    #[error("Illegal checkout transition from {from} to {to}")]
    IllegalTransition { from: &'static str, to: &'static str },
}

impl CheckoutError {
    /// True for the outcomes that are the user's choice or the gateway's verdict, rather than a system fault.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, CheckoutError::Cancelled | CheckoutError::PaymentFailed(_))
    }
}

#[derive(Debug, Clone, Error)]
pub enum ReminderError {
    #[error("Could not fetch the bills that are due. {0}")]
    FetchFailed(#[from] BillingDatabaseError),
}
