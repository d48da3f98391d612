//! User-scoped views of bills, payments and notifications.

use std::fmt::Debug;

use log::trace;

use crate::{
    account_objects::{AccountOverview, NotificationFeed, PaymentHistory},
    db_types::{Bill, Notification, PaymentStatus},
    traits::{AccountApiError, AccountManagement},
};

pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches a single bill. Returns `None` if the bill does not exist, or belongs to someone other than `user_id`.
    pub async fn bill_for_user(&self, user_id: &str, bill_id: i64) -> Result<Option<Bill>, AccountApiError> {
        let bill = self.db.fetch_bill(bill_id).await?;
        Ok(bill.filter(|b| b.user_id == user_id))
    }

    /// The user's bills, most recent due date first.
    pub async fn bills_for_user(&self, user_id: &str) -> Result<Vec<Bill>, AccountApiError> {
        self.db.fetch_bills_for_user(user_id).await
    }

    /// The user's payments, newest first. Only successful payments count towards the total.
    pub async fn payment_history(&self, user_id: &str) -> Result<PaymentHistory, AccountApiError> {
        let payments = self.db.fetch_payments_for_user(user_id).await?;
        let total_paid = payments.iter().filter(|p| p.status == PaymentStatus::Success).map(|p| p.amount).sum();
        trace!("Total paid by {user_id}: {total_paid}");
        Ok(PaymentHistory { user_id: user_id.to_string(), total_paid, payments })
    }

    pub async fn notifications(&self, user_id: &str) -> Result<NotificationFeed, AccountApiError> {
        let notifications = self.db.fetch_notifications_for_user(user_id).await?;
        let unread = notifications.iter().filter(|n| !n.read).count();
        Ok(NotificationFeed { unread, notifications })
    }

    pub async fn mark_notification_read(&self, user_id: &str, notification_id: i64) -> Result<Notification, AccountApiError> {
        self.db.mark_notification_read(user_id, notification_id).await
    }

    pub async fn overview(&self, user_id: &str) -> Result<AccountOverview, AccountApiError> {
        let bills = self.bills_for_user(user_id).await?;
        let outstanding = bills.iter().filter(|b| !b.is_paid()).map(|b| b.amount).sum();
        let history = self.payment_history(user_id).await?;
        let feed = self.notifications(user_id).await?;
        Ok(AccountOverview { user_id: user_id.to_string(), bills, outstanding, history, feed })
    }
}
