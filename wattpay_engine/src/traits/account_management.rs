use thiserror::Error;

use crate::db_types::{Bill, Notification, Payment};

/// User-scoped queries. Implementations must never return rows belonging to a different user.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches a bill by its id, irrespective of owner. Returns `None` if there is no such bill.
    async fn fetch_bill(&self, bill_id: i64) -> Result<Option<Bill>, AccountApiError>;

    /// Fetches all the bills for the given user, most recent due date first.
    async fn fetch_bills_for_user(&self, user_id: &str) -> Result<Vec<Bill>, AccountApiError>;

    /// Fetches the payment history for the given user, newest first.
    async fn fetch_payments_for_user(&self, user_id: &str) -> Result<Vec<Payment>, AccountApiError>;

    async fn fetch_payment_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>, AccountApiError>;

    /// Fetches all the notifications for the given user, newest first.
    async fn fetch_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>, AccountApiError>;

    /// Flips the `read` flag on a notification. Only the owner may do this, so the notification must belong to
    /// `user_id`, otherwise [`AccountApiError::NotificationNotFound`] is returned.
    async fn mark_notification_read(&self, user_id: &str, notification_id: i64) -> Result<Notification, AccountApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Notification {0} does not exist")]
    NotificationNotFound(i64),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}
