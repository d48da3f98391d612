use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, Payment},
    traits::BillingDatabaseError,
};

/// Inserts a new payment, failing with `PaymentAlreadyExists` if the transaction id has been seen before.
///
/// This is not atomic. Run it inside a transaction if you need the existence check and the insert to be.
pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, BillingDatabaseError> {
    if fetch_payment_by_transaction_id(&payment.transaction_id, conn).await?.is_some() {
        return Err(BillingDatabaseError::PaymentAlreadyExists(payment.transaction_id));
    }
    let payment: Payment = sqlx::query_as(
        r#"
            INSERT INTO payments (
                user_id,
                bill_id,
                transaction_id,
                amount,
                payment_method,
                status
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(payment.user_id)
    .bind(payment.bill_id)
    .bind(payment.transaction_id)
    .bind(payment.amount)
    .bind(payment.payment_method)
    .bind(payment.status)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment [{}] of {} recorded with id {}", payment.transaction_id, payment.amount, payment.id);
    Ok(payment)
}

pub async fn fetch_payment_by_transaction_id(
    transaction_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE transaction_id = $1")
        .bind(transaction_id)
        .fetch_optional(conn)
        .await
}

pub async fn fetch_payments_for_user(user_id: &str, conn: &mut SqliteConnection) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await
}
