use std::fmt::Debug;

use chrono::NaiveDate;
use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::{bills, db_url, new_pool, notifications, payments};
use crate::{
    db_types::{Bill, BillStatus, NewBill, NewNotification, NewPayment, Notification, Payment},
    traits::{AccountApiError, AccountManagement, BillingDatabase, BillingDatabaseError},
};

const DEFAULT_MAX_CONNECTIONS: u32 = 25;

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `WPS_DATABASE_URL`.
    pub async fn new() -> Result<Self, BillingDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), DEFAULT_MAX_CONNECTIONS).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, BillingDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every start-up.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        debug!("🗃️ Migrations complete for {}", self.url);
        Ok(())
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_bill(&self, bill_id: i64) -> Result<Option<Bill>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let bill = bills::fetch_bill(bill_id, &mut conn).await?;
        Ok(bill)
    }

    async fn fetch_bills_for_user(&self, user_id: &str) -> Result<Vec<Bill>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let bills = bills::fetch_bills_for_user(user_id, &mut conn).await?;
        Ok(bills)
    }

    async fn fetch_payments_for_user(&self, user_id: &str) -> Result<Vec<Payment>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let payments = payments::fetch_payments_for_user(user_id, &mut conn).await?;
        Ok(payments)
    }

    async fn fetch_payment_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let payment = payments::fetch_payment_by_transaction_id(transaction_id, &mut conn).await?;
        Ok(payment)
    }

    async fn fetch_notifications_for_user(&self, user_id: &str) -> Result<Vec<Notification>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let notifications = notifications::fetch_notifications_for_user(user_id, &mut conn).await?;
        Ok(notifications)
    }

    async fn mark_notification_read(&self, user_id: &str, notification_id: i64) -> Result<Notification, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        notifications::mark_notification_read(user_id, notification_id, &mut conn).await
    }
}

impl BillingDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_bill(&self, bill: NewBill) -> Result<Bill, BillingDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let bill = bills::insert_bill(bill, &mut tx).await?;
        tx.commit().await?;
        Ok(bill)
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, BillingDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let payment = payments::insert_payment(payment, &mut tx).await?;
        tx.commit().await?;
        Ok(payment)
    }

    async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, BillingDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let bill = bills::update_bill_status(bill_id, BillStatus::Paid, &mut conn).await?;
        debug!("🗃️ Bill #{bill_id} [{}] marked as paid", bill.bill_number);
        Ok(bill)
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification, BillingDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let notification = notifications::insert_notification(notification, &mut conn).await?;
        Ok(notification)
    }

    async fn insert_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>, BillingDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let inserted = notifications::insert_notifications(notifications, &mut tx).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn fetch_unpaid_bills_due_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Bill>, BillingDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let bills = bills::fetch_unpaid_bills_due_between(from, until, &mut conn).await?;
        Ok(bills)
    }

    async fn close(&mut self) -> Result<(), BillingDatabaseError> {
        self.pool.close().await;
        Ok(())
    }
}
