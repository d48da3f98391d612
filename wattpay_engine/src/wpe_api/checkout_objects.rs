use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wattpay_common::{Paise, INR_CURRENCY_CODE};

use crate::{
    db_types::{Bill, PaymentMethod},
    wpe_api::errors::CheckoutError,
};

/// The merchant name shown on the hosted checkout.
pub const MERCHANT_NAME: &str = "WattPay Electricity";

/// The signed-in user who is paying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutUser {
    pub user_id: String,
    pub email: Option<String>,
}

impl CheckoutUser {
    pub fn new<S: Into<String>>(user_id: S) -> Self {
        Self { user_id: user_id.into(), email: None }
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }
}

//--------------------------------------     OrderRequest      ---------------------------------------------------------
/// A request to the order issuer. The amount is in rupees; the issuer converts it to paise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    pub notes: Value,
}

impl OrderRequest {
    pub fn new(amount: f64) -> Self {
        Self { amount, currency: INR_CURRENCY_CODE.to_string(), receipt: None, notes: json!({}) }
    }

    /// Builds the order request for paying `bill` in full. The bill number is used as the receipt, and the bill and
    /// user ids are passed along as order notes.
    pub fn for_bill(bill: &Bill) -> Self {
        Self {
            amount: bill.amount.as_rupees(),
            currency: INR_CURRENCY_CODE.to_string(),
            receipt: Some(bill.bill_number.clone()),
            notes: json!({ "bill_id": bill.id, "user_id": bill.user_id }),
        }
    }

    pub fn with_receipt<S: Into<String>>(mut self, receipt: S) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn with_notes(mut self, notes: Value) -> Self {
        self.notes = notes;
        self
    }
}

/// The gateway order minted for one checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHandle {
    pub order_id: String,
    /// The order amount, in paise
    pub amount: Paise,
    pub currency: String,
    /// The gateway's public key id, needed to open the hosted checkout
    pub key_id: String,
}

//--------------------------------------    CheckoutOptions    ---------------------------------------------------------
/// Which payment methods the hosted checkout should offer. Only the method the user picked is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodPreferences {
    pub upi: bool,
    pub card: bool,
    pub netbanking: bool,
}

impl From<PaymentMethod> for MethodPreferences {
    fn from(method: PaymentMethod) -> Self {
        Self {
            upi: method == PaymentMethod::Upi,
            card: method == PaymentMethod::Card,
            netbanking: method == PaymentMethod::NetBanking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    pub key_id: String,
    pub order_id: String,
    pub amount: Paise,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub prefill_email: Option<String>,
    pub method: MethodPreferences,
}

impl CheckoutOptions {
    pub fn new(order: &OrderHandle, session: &CheckoutSession) -> Self {
        Self {
            key_id: order.key_id.clone(),
            order_id: order.order_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: format!("Electricity bill {} ({})", session.bill.bill_number, session.bill.billing_month),
            prefill_email: session.user.email.clone(),
            method: session.method.into(),
        }
    }
}

/// The single result a hosted checkout reports for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// The user closed the checkout without paying.
    Dismissed,
    /// The gateway reported `payment.failed`.
    Failed { reason: String },
    /// The gateway's success callback. The payment id can be missing, in which case a local id is generated.
    Succeeded { payment_id: Option<String> },
}

//--------------------------------------     CheckoutState     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub transaction_id: String,
    pub bill_id: i64,
    pub amount: Paise,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    #[default]
    Idle,
    OrderRequested,
    CheckoutOpen(OrderHandle),
    Reconciling { transaction_id: String },
    Done(CheckoutReceipt),
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "Idle",
            CheckoutState::OrderRequested => "OrderRequested",
            CheckoutState::CheckoutOpen(_) => "CheckoutOpen",
            CheckoutState::Reconciling { .. } => "Reconciling",
            CheckoutState::Done(_) => "Done",
        }
    }

    /// Returns true if the session may move from `self` to `next`.
    pub fn can_transition_to(&self, next: &CheckoutState) -> bool {
        use CheckoutState::*;
        matches!(
            (self, next),
            (Idle, OrderRequested) |
                (OrderRequested, CheckoutOpen(_)) |
                (OrderRequested, Idle) |
                (CheckoutOpen(_), Idle) |
                (CheckoutOpen(_), Reconciling { .. }) |
                (Reconciling { .. }, Done(_))
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Done(_))
    }
}

impl Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One attempt to pay one bill. A session that has reached `Done` cannot be reused; start a new one instead.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub user: CheckoutUser,
    pub bill: Bill,
    pub method: PaymentMethod,
    state: CheckoutState,
}

impl CheckoutSession {
    pub fn new(user: CheckoutUser, bill: Bill, method: PaymentMethod) -> Self {
        Self { user, bill, method, state: CheckoutState::Idle }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn transition(&mut self, next: CheckoutState) -> Result<(), CheckoutError> {
        if !self.state.can_transition_to(&next) {
            return Err(CheckoutError::IllegalTransition { from: self.state.name(), to: next.name() });
        }
        self.state = next;
        Ok(())
    }

    pub fn receipt(&self) -> Option<&CheckoutReceipt> {
        match &self.state {
            CheckoutState::Done(receipt) => Some(receipt),
            _ => None,
        }
    }
}
