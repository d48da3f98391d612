use chrono::NaiveDate;
use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{Bill, BillStatus, NewBill},
    traits::BillingDatabaseError,
};

/// Inserts a new bill. Fails with `BillAlreadyExists` if the bill number is already taken.
///
/// This is not atomic. Pass `&mut *tx` as the connection argument if the check and the insert must happen together.
pub async fn insert_bill(bill: NewBill, conn: &mut SqliteConnection) -> Result<Bill, BillingDatabaseError> {
    if fetch_bill_by_number(&bill.bill_number, conn).await?.is_some() {
        return Err(BillingDatabaseError::BillAlreadyExists(bill.bill_number));
    }
    let bill: Bill = sqlx::query_as(
        r#"
            INSERT INTO bills (
                user_id,
                bill_number,
                billing_month,
                amount,
                units_consumed,
                due_date
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(bill.user_id)
    .bind(bill.bill_number)
    .bind(bill.billing_month)
    .bind(bill.amount)
    .bind(bill.units_consumed)
    .bind(bill.due_date)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Bill [{}] inserted with id {}", bill.bill_number, bill.id);
    Ok(bill)
}

pub async fn fetch_bill(id: i64, conn: &mut SqliteConnection) -> Result<Option<Bill>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM bills WHERE id = $1").bind(id).fetch_optional(conn).await
}

pub async fn fetch_bill_by_number(bill_number: &str, conn: &mut SqliteConnection) -> Result<Option<Bill>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM bills WHERE bill_number = $1").bind(bill_number).fetch_optional(conn).await
}

pub async fn fetch_bills_for_user(user_id: &str, conn: &mut SqliteConnection) -> Result<Vec<Bill>, sqlx::Error> {
    let bills = sqlx::query_as("SELECT * FROM bills WHERE user_id = $1 ORDER BY due_date DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(bills)
}

/// Fetches all unpaid bills due between `from` and `until`, inclusive. Dates are stored as ISO-8601 strings, so the
/// lexical comparison is also the chronological one.
pub async fn fetch_unpaid_bills_due_between(
    from: NaiveDate,
    until: NaiveDate,
    conn: &mut SqliteConnection,
) -> Result<Vec<Bill>, sqlx::Error> {
    let bills: Vec<Bill> = sqlx::query_as(
        r#"
        SELECT * FROM bills
        WHERE status = $1 AND due_date >= $2 AND due_date <= $3
        ORDER BY due_date ASC, id ASC
        "#,
    )
    .bind(BillStatus::Unpaid)
    .bind(from)
    .bind(until)
    .fetch_all(conn)
    .await?;
    trace!("🗃️ {} unpaid bills are due between {from} and {until}", bills.len());
    Ok(bills)
}

pub async fn update_bill_status(
    id: i64,
    status: BillStatus,
    conn: &mut SqliteConnection,
) -> Result<Bill, BillingDatabaseError> {
    let result: Option<Bill> = sqlx::query_as("UPDATE bills SET status = $1 WHERE id = $2 RETURNING *")
        .bind(status)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    result.ok_or(BillingDatabaseError::BillNotFound(id))
}
