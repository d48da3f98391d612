use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    db_types::{Bill, NewBill, NewNotification, NewPayment, Notification, Payment},
    traits::{AccountApiError, AccountManagement},
};

/// This trait defines the writes that the payment and reminder flows make against the store.
///
/// None of these methods wrap more than one logical write. In particular, recording a payment, marking its bill as
/// paid, and notifying the user are three separate calls, and the store offers no transaction across them.
#[allow(async_fn_in_trait)]
pub trait BillingDatabase: Clone + AccountManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Stores a newly issued bill with `unpaid` status. Bill numbers are unique; inserting a bill number that already
    /// exists returns [`BillingDatabaseError::BillAlreadyExists`].
    async fn insert_bill(&self, bill: NewBill) -> Result<Bill, BillingDatabaseError>;

    /// Records a payment attempt. Transaction ids are unique; if the transaction id has already been recorded, nothing
    /// is written and [`BillingDatabaseError::PaymentAlreadyExists`] is returned.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, BillingDatabaseError>;

    /// Sets the bill's status to `paid` and returns the updated bill. Marking a bill that is already paid is not an
    /// error, since `paid` is terminal.
    async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, BillingDatabaseError>;

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification, BillingDatabaseError>;

    /// Inserts all the notifications in a single atomic transaction. Either all of them are stored, or none are.
    async fn insert_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>, BillingDatabaseError>;

    /// Fetches every unpaid bill, for any user, whose due date lies in `[from, until]`, inclusive at both ends.
    async fn fetch_unpaid_bills_due_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Bill>, BillingDatabaseError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), BillingDatabaseError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum BillingDatabaseError {
    #[error("We have an internal database engine (configuration/uptime etc.) error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert bill, since bill number {0} already exists")]
    BillAlreadyExists(String),
    #[error("Cannot insert payment, since it already exists with transaction id {0}")]
    PaymentAlreadyExists(String),
    #[error("The requested bill {0} does not exist")]
    BillNotFound(i64),
    #[error("{0}")]
    AccountError(#[from] AccountApiError),
}

impl From<sqlx::Error> for BillingDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        BillingDatabaseError::DatabaseError(e.to_string())
    }
}
