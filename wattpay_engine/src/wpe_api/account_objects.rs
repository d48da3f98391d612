use serde::{Deserialize, Serialize};
use wattpay_common::Paise;

use crate::db_types::{Bill, Notification, Payment};

/// A user's payment history, newest first, along with the sum of their successful payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub user_id: String,
    pub total_paid: Paise,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFeed {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}

/// Everything the portal's overview page shows for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub user_id: String,
    pub bills: Vec<Bill>,
    /// The sum of all unpaid bills
    pub outstanding: Paise,
    pub history: PaymentHistory,
    pub feed: NotificationFeed,
}
