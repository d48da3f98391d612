use chrono::NaiveDate;
use mockall::mock;
use wattpay_engine::{
    checkout_objects::{OrderHandle, OrderRequest},
    db_types::{Bill, NewBill, NewNotification, NewPayment, Notification, Payment},
    traits::{AccountApiError, AccountManagement, BillingDatabase, BillingDatabaseError},
    OrderIssuer,
    OrderIssuerError,
};

mock! {
    pub Issuer {}
    impl OrderIssuer for Issuer {
        fn ready(&self) -> Result<(), OrderIssuerError>;
        async fn issue_order(&self, request: OrderRequest) -> Result<OrderHandle, OrderIssuerError>;
    }
}

mock! {
    pub Store {}
    impl Clone for Store {
        fn clone(&self) -> Self;
    }
    impl AccountManagement for Store {
        async fn fetch_bill(&self, bill_id: i64) -> Result<Option<Bill>, AccountApiError>;
        async fn fetch_bills_for_user(&self, user_id: &str) -> Result<Vec<Bill>, AccountApiError>;
        async fn fetch_payments_for_user(&self, user_id: &str) -> Result<Vec<Payment>, AccountApiError>;
        async fn fetch_payment_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>, AccountApiError>;
        async fn fetch_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>, AccountApiError>;
        async fn mark_notification_read(&self, user_id: &str, notification_id: i64) -> Result<Notification, AccountApiError>;
    }
    impl BillingDatabase for Store {
        fn url(&self) -> &str;
        async fn insert_bill(&self, bill: NewBill) -> Result<Bill, BillingDatabaseError>;
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, BillingDatabaseError>;
        async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, BillingDatabaseError>;
        async fn insert_notification(&self, notification: NewNotification) -> Result<Notification, BillingDatabaseError>;
        async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> Result<Vec<Notification>, BillingDatabaseError>;
        async fn fetch_unpaid_bills_due_between(&self, from: NaiveDate, until: NaiveDate) -> Result<Vec<Bill>, BillingDatabaseError>;
    }
}
