//! Message builders and small utilities shared by the checkout and reminder flows.
use chrono::{DateTime, NaiveDate, Utc};

use crate::db_types::Bill;

/// The title given to every successful-payment notification.
pub const PAYMENT_SUCCESS_TITLE: &str = "Payment Successful";

/// Builds a local transaction id when the gateway's success callback arrives without a payment id. The id is
/// `TXN-` followed by the last eight digits of the Unix timestamp in milliseconds.
///
/// These ids are not unique across sessions that complete in the same millisecond.
pub fn fallback_transaction_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().rem_euclid(100_000_000);
    format!("TXN-{millis:08}")
}

/// The format used for due dates in user-facing messages, e.g. "21 Jun 2024"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn reminder_message(bill: &Bill) -> String {
    format!(
        "Your bill {} for {} ({}) is due on {}. Pay now to avoid late fees.",
        bill.bill_number,
        bill.billing_month,
        bill.amount,
        display_date(bill.due_date)
    )
}

pub fn payment_success_message(bill: &Bill, transaction_id: &str) -> String {
    format!(
        "Your payment of {} for {} (bill {}) was successful. Transaction ID: {transaction_id}",
        bill.amount, bill.billing_month, bill.bill_number
    )
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use wattpay_common::Paise;

    use super::*;
    use crate::db_types::BillStatus;

    fn bill() -> Bill {
        Bill {
            id: 1,
            user_id: "user-1".into(),
            bill_number: "INV-2024-06".into(),
            billing_month: "June 2024".into(),
            amount: Paise::from(13250),
            units_consumed: 1100.0,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            status: BillStatus::Unpaid,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fallback_ids_use_last_eight_digits() {
        let now = Utc.timestamp_millis_opt(1_718_000_012_345).unwrap();
        assert_eq!(fallback_transaction_id(now), "TXN-00012345");
        let now = Utc.timestamp_millis_opt(1_718_987_654_321).unwrap();
        assert_eq!(fallback_transaction_id(now), "TXN-87654321");
    }

    #[test]
    fn reminder_text() {
        assert_eq!(
            reminder_message(&bill()),
            "Your bill INV-2024-06 for June 2024 (₹132.50) is due on 21 Jun 2024. Pay now to avoid late fees."
        );
    }

    #[test]
    fn success_text_mentions_amount_period_and_txid() {
        let msg = payment_success_message(&bill(), "pay_abc123");
        assert!(msg.contains("₹132.50"));
        assert!(msg.contains("June 2024"));
        assert!(msg.contains("pay_abc123"));
    }
}
