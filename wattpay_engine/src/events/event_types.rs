use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db_types::{Bill, Notification, Payment};

/// Published once a checkout session has finished its reconciliation writes.
///
/// Each of the three writes is independent, so any of them may be missing here. `payment` is `None` when the payment
/// insert failed, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReconciledEvent {
    pub user_id: String,
    pub bill_id: i64,
    pub transaction_id: String,
    pub payment: Option<Payment>,
    pub bill: Option<Bill>,
    pub notification: Option<Notification>,
}

impl PaymentReconciledEvent {
    /// True if all three writes succeeded.
    pub fn is_complete(&self) -> bool {
        self.payment.is_some() && self.bill.is_some() && self.notification.is_some()
    }
}

/// Published after a reminder sweep has stored its notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersSentEvent {
    pub swept_on: NaiveDate,
    pub notifications: Vec<Notification>,
}

impl RemindersSentEvent {
    pub fn new(swept_on: NaiveDate, notifications: Vec<Notification>) -> Self {
        Self { swept_on, notifications }
    }
}
